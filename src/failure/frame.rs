//! Capture locations.

use std::fmt;
use std::panic::Location;

/// Where an annotation was attached: the enclosing function and the source
/// position of the call.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    owner: &'static str,
    location: &'static Location<'static>,
}

impl Frame {
    /// Record the caller's source position under `owner`.
    #[track_caller]
    pub fn caller(owner: &'static str) -> Self {
        Self {
            owner,
            location: Location::caller(),
        }
    }

    pub fn owner(&self) -> &'static str {
        self.owner
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}:{}:{})",
            self.owner,
            self.location.file(),
            self.location.line(),
            self.location.column()
        )
    }
}

/// Turn the type name of a marker fn nested in the caller into the caller's
/// path, e.g. `annotated_echo::failure::layers::dao::__owner` becomes
/// `annotated_echo::failure::layers::dao`.
pub fn owner_of(marker: &'static str) -> &'static str {
    let mut owner = marker.strip_suffix("::__owner").unwrap_or(marker);
    while let Some(outer) = owner.strip_suffix("::{{closure}}") {
        owner = outer;
    }
    owner
}
