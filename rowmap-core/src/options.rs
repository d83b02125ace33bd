use crate::Log;
use std::{
    borrow::Cow,
    fmt::{self, Debug},
    sync::{Arc, PoisonError, RwLock},
};
use time::UtcOffset;

/// Layout used to parse textual timestamps when neither the call options nor
/// [`set_default_time_layout`] provide one. It uses the `time` crate format description syntax.
pub const DEFAULT_TIME_LAYOUT: &str = "[year]-[month]-[day] [hour]:[minute]:[second]";

static TIME_LAYOUT: RwLock<Cow<'static, str>> = RwLock::new(Cow::Borrowed(DEFAULT_TIME_LAYOUT));

/// Replace the process wide default time layout.
pub fn set_default_time_layout(layout: impl Into<Cow<'static, str>>) {
    *TIME_LAYOUT.write().unwrap_or_else(PoisonError::into_inner) = layout.into();
}

/// Current process wide default time layout.
pub fn default_time_layout() -> Cow<'static, str> {
    TIME_LAYOUT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Callback receiving the execution log once per drained result set.
pub type Observer = Arc<dyn Fn(&Log) + Send + Sync>;

/// Per call configuration of the fetch operations.
#[derive(Clone, Default)]
pub struct Options {
    /// Overrides the process wide default time layout.
    pub time_layout: Option<Cow<'static, str>>,
    /// Offset assigned to timestamps parsed from text, the local time zone on the parsed date when
    /// `None`.
    pub offset: Option<UtcOffset>,
    /// Receives the execution log.
    pub observer: Option<Observer>,
}

impl Options {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_time_layout(mut self, layout: impl Into<Cow<'static, str>>) -> Self {
        self.time_layout = Some(layout.into());
        self
    }

    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_observer(mut self, observer: impl Fn(&Log) + Send + Sync + 'static) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// The layout in effect for this call.
    pub fn time_layout(&self) -> Cow<'static, str> {
        match &self.time_layout {
            Some(layout) if !layout.is_empty() => layout.clone(),
            _ => default_time_layout(),
        }
    }
}

impl Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("time_layout", &self.time_layout)
            .field("offset", &self.offset)
            .field("observer", &self.observer.as_ref().map(|_| ".."))
            .finish()
    }
}
