//! The fault boundary around one render pass.

use log::trace;
use std::panic::{self, AssertUnwindSafe};

use crate::config::BarStyle;
use crate::diagnostics::{Diagnostics, Fault};
use crate::scene::Scene;
use crate::surface::Surface;
use crate::value::ValueSnapshot;

/// How a render pass ended. None of these is an error for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// The surface had no area; nothing was drawn.
    Skipped,
    /// Every primitive was issued.
    Drawn(usize),
    /// A fault was recorded and the rest of the pass abandoned.
    Faulted,
}

/// Build and issue the scene for `state`.
///
/// Surface errors and panics raised while building or drawing are caught
/// here, recorded in `diagnostics`, and reported as [`PassOutcome::Faulted`].
pub fn render_pass(
    surface: &mut dyn Surface,
    state: ValueSnapshot,
    style: &BarStyle,
    width: i32,
    height: i32,
    diagnostics: &mut Diagnostics,
) -> PassOutcome {
    if width <= 0 || height <= 0 {
        return PassOutcome::Skipped;
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        Scene::build(state, style, width, height).render(surface)
    }));

    match outcome {
        Ok(Ok(issued)) => {
            trace!("render pass {width}x{height} issued {issued} primitives");
            PassOutcome::Drawn(issued)
        }
        Ok(Err(fault)) => {
            diagnostics.record(fault);
            PassOutcome::Faulted
        }
        Err(payload) => {
            diagnostics.record(Fault::from_panic(payload.as_ref()));
            PassOutcome::Faulted
        }
    }
}
