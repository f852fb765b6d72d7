//! Render cycle update handlers
//!
//! A render is requested for a specific source revision. When the rendered
//! tree comes back it is dropped if the source has moved on in the meantime;
//! otherwise it replaces the current view wholesale and instrumentation is
//! scheduled after the configured delay.

use crate::commands::Cmd;
use crate::messages::RenderMsg;
use crate::model::{AppModel, View};
use crate::selection::Mode;
use crate::surface::Surface;

/// Command rendering the current source revision
pub fn render_current(model: &AppModel) -> Cmd {
    Cmd::Render {
        revision: model.source.revision(),
        source: model.source.text(),
    }
}

/// Handle render-related messages
pub fn update_render(model: &mut AppModel, msg: RenderMsg) -> Option<Cmd> {
    match msg {
        RenderMsg::Rendered { revision, tree } => {
            if revision != model.source.revision() {
                tracing::debug!(
                    "Skipping stale render: source revision {} != render revision {}",
                    model.source.revision(),
                    revision
                );
                return None;
            }

            model.render_generation += 1;
            let mut view = View::new(model.render_generation, revision, *tree);
            if model.mode == Mode::StructuralDelete {
                view.selection
                    .set_mode(&mut view.tree, model.mode, &model.config);
            }
            model.view = Some(view);
            model.last_error = None;

            tracing::debug!(
                generation = model.render_generation,
                revision,
                "view replaced"
            );
            Some(Cmd::ScheduleInstrument {
                delay_ms: model.config.instrument_delay_ms,
            })
        }

        RenderMsg::Failed { revision, reason } => {
            tracing::warn!("Render of revision {} failed: {}", revision, reason);
            model.last_error = Some(reason);
            None
        }

        RenderMsg::InstrumentReady => {
            let view = model.view.as_mut()?;
            if view.is_instrumented() {
                return None;
            }
            view.surface = Some(Surface::install(
                &mut view.tree,
                &model.config,
                view.revision,
            ));
            None
        }
    }
}
