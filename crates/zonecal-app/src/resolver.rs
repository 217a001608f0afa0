//! Resolves `VTIMEZONE` blocks from a directory of `<Zone>.ics` files.

use std::io::ErrorKind;

use futures::FutureExt;
use futures::future::BoxFuture;
use zonecal_core::config::TimezonesConfig;
use zonecal_rfc::RfcError;
use zonecal_rfc::error::RfcResult;
use zonecal_rfc::rfc::ical::{TimeZone, TimeZoneResolver};

/// Reads `<dir>/<tzid>.ics` for every requested zone.
///
/// A missing file means the zone is unavailable; other I/O failures are
/// reported as resolution errors.
#[derive(Debug, Clone)]
pub struct DirectoryResolver {
    config: TimezonesConfig,
}

impl DirectoryResolver {
    /// Returns `None` when no directory is configured.
    #[must_use]
    pub fn from_config(config: &TimezonesConfig) -> Option<Self> {
        config.dir.as_ref().map(|_dir| Self {
            config: config.clone(),
        })
    }
}

impl TimeZoneResolver for DirectoryResolver {
    fn resolve<'a>(&'a self, tzid: &'a str) -> BoxFuture<'a, RfcResult<Option<TimeZone>>> {
        async move {
            // Zone names never climb out of the directory.
            if tzid.split('/').any(|part| part.is_empty() || part == "..") {
                return Ok(None);
            }

            let Some(path) = self.config.zone_file(tzid) else {
                return Ok(None);
            };

            match tokio::fs::read_to_string(&path).await {
                Ok(block) => {
                    tracing::trace!(tzid, path = %path.display(), "Loaded time zone definition");
                    let timezone = TimeZone::from_block(&block);
                    Ok((!timezone.is_empty()).then_some(timezone))
                }
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(RfcError::TimezoneResolution {
                    tzid: tzid.to_string(),
                    reason: e.to_string(),
                }),
            }
        }
        .boxed()
    }
}
