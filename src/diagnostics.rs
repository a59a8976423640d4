//! Fault records collected by the render pass.
//!
//! A pass never returns an error to its caller. Anything that goes wrong
//! while computing geometry or drawing is turned into a [`Fault`] and kept
//! here until [`Diagnostics::clear`] is called.

use log::warn;
use std::any::Any;
use std::fmt;

use crate::surface::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Font,
    Geometry,
    Surface,
    Panic,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::Font => "FontError",
            FaultKind::Geometry => "GeometryError",
            FaultKind::Surface => "SurfaceError",
            FaultKind::Panic => "Panic",
        };
        f.write_str(name)
    }
}

/// One failed render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    /// Where the pass stopped: `fill`, `text`, `border` or `paint`.
    pub site: &'static str,
    pub message: String,
    pub kind: FaultKind,
}

impl Fault {
    pub fn from_render_error(site: &'static str, error: &RenderError) -> Self {
        Self {
            site,
            message: error.to_string(),
            kind: error.kind(),
        }
    }

    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "unknown panic payload".to_string()
        };
        Self {
            site: "paint",
            message,
            kind: FaultKind::Panic,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error in {}\n Message: {}\nType: {}\n",
            self.site, self.message, self.kind
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    faults: Vec<Fault>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, fault: Fault) {
        warn!(
            "render pass faulted in {}: {} ({})",
            fault.site, fault.message, fault.kind
        );
        self.faults.push(fault);
    }

    pub fn has_fault(&self) -> bool {
        !self.faults.is_empty()
    }

    pub fn faults(&self) -> &[Fault] {
        &self.faults
    }

    /// Every recorded fault, oldest first, as one human-readable string.
    pub fn fault_log(&self) -> String {
        self.faults.iter().map(ToString::to_string).collect()
    }

    pub fn clear(&mut self) {
        self.faults.clear();
    }
}
