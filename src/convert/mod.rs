//! Conversion engine.
//!
//! [`Converter`] is the entry point: it walks each entry point's exports
//! in stable order, dispatches symbols and types through the converters,
//! then runs the whole-project resolution pass and hands back the
//! finished [`ProjectReflection`] plus the diagnostics of the run.

pub mod context;
pub mod hooks;
pub mod resolve;
pub mod signatures;
pub mod symbols;
pub mod types;

pub use context::{Context, ConversionMode, ConverterState};
pub use hooks::ConverterHooks;
pub use symbols::{CONVERSION_ORDER, Category, convert_symbol, order_index};
pub use types::convert_type;

use crate::comments::{CommentSource, GraphComments};
use crate::diagnostics::DiagnosticBag;
use crate::options::ConverterOptions;
use crate::reflection::ProjectReflection;
use crate::semantic::SemanticGraph;
use tracing::debug_span;

/// A finished conversion: the reflection model and everything the run had
/// to say about the input.
#[derive(Debug)]
pub struct ConversionResult {
    pub project: ProjectReflection,
    pub diagnostics: DiagnosticBag,
}

/// Converts a semantic graph into a project of reflections.
#[derive(Debug, Default)]
pub struct Converter {
    pub options: ConverterOptions,
    hooks: ConverterHooks,
}

impl Converter {
    pub fn new(options: ConverterOptions) -> Self {
        Converter {
            options,
            hooks: ConverterHooks::new(),
        }
    }

    /// Lifecycle listeners, registered before the run starts.
    pub fn hooks_mut(&mut self) -> &mut ConverterHooks {
        &mut self.hooks
    }

    /// Run the conversion with the graph's own stored comments.
    pub fn convert(self, graph: &SemanticGraph, project_name: &str) -> ConversionResult {
        self.convert_with_comments(graph, &GraphComments, project_name)
    }

    /// Run the conversion with an explicit comment source.
    ///
    /// Single-threaded by design: symbols convert depth-first in stable
    /// order, entry point by entry point, and cross-entry references are
    /// fixed by the single resolution pass at the end.
    pub fn convert_with_comments(
        self,
        graph: &SemanticGraph,
        comments: &dyn CommentSource,
        project_name: &str,
    ) -> ConversionResult {
        let span = debug_span!("convert", project = project_name);
        let _entered = span.enter();

        let mut state =
            ConverterState::new(graph, comments, self.options, self.hooks, project_name);
        state.fire_begin();

        if let [entry] = graph.entry_points.as_slice() {
            // A single entry point merges into the project root.
            let mut ctx = Context::new(&mut state);
            symbols::convert_module_members(&mut ctx, *entry);
        } else {
            for &entry in &graph.entry_points {
                let mut ctx = Context::new(&mut state);
                convert_symbol(&mut ctx, entry, None, None);
            }
        }

        resolve::resolve_project(&mut state);
        state.fire_end();

        ConversionResult {
            project: state.project,
            diagnostics: state.diagnostics,
        }
    }
}
