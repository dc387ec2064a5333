//! One invocation: collect, render, report

use std::fmt;

use anyhow::Result;
use chrono::Utc;
use jeedom_api::collectors::{self, AtStage, CollectError, Stage};
use jeedom_api::{connectivity, ApiError};
use jeedom_core::{categories, NotificationCounts, StatusRecord};
use jeedom_render::{BarOutput, IconSet, MenuContext, StatusLine, UpgradeNotice};
use tracing::{debug, warn};

use crate::settings::Settings;
use crate::version_check::{check_for_upgrade, FileVersionCache, GithubReleases};

/// What gets printed on stdout
#[derive(Debug)]
pub enum Report {
    /// Rendered bar output
    Bar(BarOutput),
    /// No configured URL answered
    Unavailable,
    /// A collector failed
    Failed(CollectError),
}

impl Report {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Bar(_))
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar(output) => write!(f, "{output}"),
            Self::Unavailable => f.write_str("Jeedom N/A"),
            Self::Failed(e) => write!(f, "{e}"),
        }
    }
}

/// Record rendered by `--fake`
pub fn sample_record() -> StatusRecord {
    [
        (categories::ALARM, "1"),
        (categories::DOOR, "2"),
        (categories::HUMIDITY, "3"),
        (categories::LIGHT, "4"),
        (categories::LUMINOSITY, "5"),
        (categories::MOTION, "6"),
        (categories::OUTLET, "7"),
        (categories::POWER, "8"),
        (categories::SECURITY, "9"),
        (categories::SHUTTER, "1"),
        (categories::TEMPERATURE, "2"),
        (categories::WINDOWS, "3"),
    ]
    .into_iter()
    .collect()
}

/// Run the whole pipeline
///
/// Hub failures become a [`Report`]; only unusable settings are errors.
pub async fn run(settings: &Settings) -> Result<Report> {
    let host = settings.bar_type.resolve();
    let icons = IconSet::for_style(settings.style);
    debug!("Rendering for {} with the {} style", host, settings.style);

    if settings.fake {
        let line = StatusLine::build(&sample_record(), NotificationCounts::default(), &icons);
        return Ok(Report::Bar(host.render(&line, &MenuContext::default())));
    }

    let client = match connectivity::select_reachable(
        settings.urls.as_slice(),
        &settings.api_key,
        settings.timeout,
    )
    .await
    {
        Ok(client) => client,
        Err(ApiError::NoReachableUrl) => {
            if settings.debug {
                println!("{}", ApiError::NoReachableUrl);
            }
            return Ok(Report::Unavailable);
        }
        Err(e) => return Err(e.into()),
    };

    let version = match client.version().await.at_stage(Stage::Version) {
        Ok(version) => version,
        Err(e) => return Ok(Report::Failed(e)),
    };
    if settings.debug {
        println!("Jeedom version: {version}");
    }

    let status =
        match collectors::collect_all(&client, &version, settings.ignore_battery_warning).await {
            Ok(status) => status,
            Err(e) => return Ok(Report::Failed(e)),
        };
    if settings.debug {
        println!("Global summary: {}", status.record);
        println!("Notifications: {:?}", status.counts);
    }

    let line = StatusLine::build(&status.record, status.counts, &icons);
    let mut menu = MenuContext::new(client.base_url());
    if host.has_menu() {
        menu = menu.with_upgrade(upgrade_notice(settings).await);
    }

    Ok(Report::Bar(host.render(&line, &menu)))
}

async fn upgrade_notice(settings: &Settings) -> Option<UpgradeNotice> {
    let cache = FileVersionCache::new(&settings.version_cache);
    let source = match GithubReleases::new(&settings.release_url) {
        Ok(source) => source,
        Err(e) => {
            warn!("Version check disabled: {}", e);
            return None;
        }
    };

    let check = check_for_upgrade(env!("CARGO_PKG_VERSION"), &cache, &source, Utc::now()).await;
    debug!("Version check: {:?}", check);

    let latest = check.latest.filter(|_| check.available)?;
    Some(UpgradeNotice {
        latest,
        release_url: settings.release_url.clone(),
    })
}
