mod api;
mod components;

use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::render_results;
use components::sidebar::render_sidebar;
use components::upload_section::render_upload_section;
use components::utils::render_error_message;
use gloo_file::File as GlooFile;
use shared::cycle::AnalysisCycle;
use shared::{AnalysisOutcome, ImagePreview};
use web_sys::DragEvent;
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // File operations
    FileChosen(GlooFile),
    FileRejected(String),
    PreviewLoaded(u64, Result<ImagePreview, String>),
    ClearFile,

    // Analysis operations
    Analyze,
    AnalysisFinished(u64, Result<AnalysisOutcome, String>),

    // Input events
    SetDragging(bool),
    HandleDrop(DragEvent),
}

// Main component
pub struct Model {
    cycle: AnalysisCycle,
    file: Option<GlooFile>,
    notice: Option<String>,
    is_dragging: bool,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            cycle: AnalysisCycle::default(),
            file: None,
            notice: None,
            is_dragging: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileChosen(file) => handlers::handle_file_chosen(self, ctx, file),
            Msg::FileRejected(message) => handlers::handle_file_rejected(self, message),
            Msg::PreviewLoaded(generation, preview) => {
                self.cycle.preview_loaded(generation, preview)
            }
            Msg::ClearFile => handlers::handle_clear_file(self),

            Msg::Analyze => handlers::handle_analyze(self, ctx),
            Msg::AnalysisFinished(generation, outcome) => {
                self.cycle.finished(generation, outcome)
            }

            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }

                <div class="layout">
                    { render_sidebar() }

                    <main class="main-content">
                        { render_upload_section(self, ctx) }
                        { render_error_message(self) }
                        <div class="columns">
                            { render_preview_area(self, ctx) }
                            { render_results(self) }
                        </div>
                    </main>
                </div>

                <footer class="app-footer">
                    <p>{"Note: This system uses a deep learning-based emotion recognition model, and the analysis results are for reference only."}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
