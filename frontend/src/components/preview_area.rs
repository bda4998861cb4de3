use super::utils::debounce;
use crate::{Model, Msg};
use shared::cycle::Phase;
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let phase = model.cycle.phase();
    if matches!(phase, Phase::Idle { loading: false }) {
        return html! {};
    }

    let link = ctx.link().clone();

    html! {
        <div id="preview-container" class="column">
            <h2>{"Original Image"}</h2>
            { render_image(model) }
            <div class="button-container">
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    disabled={model.cycle.is_busy()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearFile)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
                <button
                    class="analyze-btn"
                    disabled={model.cycle.is_busy() || model.cycle.preview().is_none()}
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Analyze)
                    })}
                >
                    { render_analyze_button_content(phase) }
                </button>
            </div>
        </div>
    }
}

fn render_image(model: &Model) -> Html {
    match model.cycle.preview() {
        Some(preview) => html! {
            <>
                if let Some(notice) = preview.notice() {
                    <div class="info-notice">
                        <i class="fa-solid fa-circle-info"></i>
                        <p>{ notice }</p>
                    </div>
                }
                <img id="actual-image-preview"
                    src={preview.data_url.clone()}
                    alt={preview.file_name.clone()}
                    title={format!("{} ({}x{} {})", preview.file_name, preview.width, preview.height, preview.format)} />
            </>
        },
        None if matches!(model.cycle.phase(), Phase::Idle { loading: true }) => html! {
            <div class="loading-preview">
                <i class="fa-solid fa-spinner fa-spin fa-2x"></i>
                <p style="margin-left: 10px;">{"Loading preview..."}</p>
            </div>
        },
        None => html! {
            <div class="unavailable-preview">
                <p>{"Preview unavailable"}</p>
            </div>
        },
    }
}

fn render_analyze_button_content(phase: &Phase) -> Html {
    if matches!(phase, Phase::Classifying { .. }) {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing facial emotions..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Analyze Emotion"}</> }
    }
}
