//! Time zone resolution for calendars that embed `VTIMEZONE` definitions.

use std::future::Future;

use futures::FutureExt;
use futures::future::{self, BoxFuture};

use crate::error::RfcResult;
use crate::rfc::ical::component::TimeZone;

/// Looks up a `VTIMEZONE` definition by its IANA name.
///
/// `Ok(None)` and `Err(_)` both mean "no definition"; the calendar drops
/// the zone and keeps rendering.
pub trait TimeZoneResolver: Send + Sync {
    fn resolve<'a>(&'a self, tzid: &'a str) -> BoxFuture<'a, RfcResult<Option<TimeZone>>>;
}

/// Adapts an async closure `Fn(String) -> Future<Output = RfcResult<Option<TimeZone>>>`.
pub struct FnResolver<F> {
    resolve: F,
}

impl<F> FnResolver<F> {
    #[must_use]
    pub const fn new(resolve: F) -> Self {
        Self { resolve }
    }
}

impl<F, Fut> TimeZoneResolver for FnResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = RfcResult<Option<TimeZone>>> + Send + 'static,
{
    fn resolve<'a>(&'a self, tzid: &'a str) -> BoxFuture<'a, RfcResult<Option<TimeZone>>> {
        (self.resolve)(tzid.to_string()).boxed()
    }
}

/// Shorthand for [`FnResolver::new`].
#[must_use]
pub const fn resolver_fn<F, Fut>(resolve: F) -> FnResolver<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = RfcResult<Option<TimeZone>>> + Send + 'static,
{
    FnResolver::new(resolve)
}

/// Adapts a synchronous lookup returning a rendered `VTIMEZONE` block.
///
/// `None` or an empty string means the zone is unavailable.
pub struct SyncResolver<F> {
    lookup: F,
}

impl<F> SyncResolver<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    #[must_use]
    pub const fn new(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F> TimeZoneResolver for SyncResolver<F>
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn resolve<'a>(&'a self, tzid: &'a str) -> BoxFuture<'a, RfcResult<Option<TimeZone>>> {
        let resolved = (self.lookup)(tzid)
            .filter(|block| !block.trim().is_empty())
            .map(|block| TimeZone::from_block(&block));
        future::ready(Ok(resolved)).boxed()
    }
}
