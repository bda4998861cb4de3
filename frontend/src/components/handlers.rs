use crate::api::{analyze_image, preview_image};
use crate::components::utils::first_image_file;
use crate::{Model, Msg};
use gloo_file::File as GlooFile;
use wasm_bindgen_futures::spawn_local;
use web_sys::DragEvent;
use yew::prelude::*;

pub fn handle_file_chosen(model: &mut Model, ctx: &Context<Model>, file: GlooFile) -> bool {
    let generation = model.cycle.upload();
    model.notice = None;
    model.file = Some(file.clone());
    log::info!("Selected {} ({} bytes)", file.name(), file.size());

    let link = ctx.link().clone();
    spawn_local(async move {
        let preview = preview_image(&file).await;
        link.send_message(Msg::PreviewLoaded(generation, preview));
    });

    true
}

pub fn handle_file_rejected(model: &mut Model, message: String) -> bool {
    model.notice = Some(message);
    true
}

pub fn handle_clear_file(model: &mut Model) -> bool {
    model.cycle.reset();
    model.file = None;
    model.notice = None;
    true
}

pub fn handle_analyze(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(file) = model.file.clone() else {
        return false;
    };
    let Some(generation) = model.cycle.trigger() else {
        return false;
    };
    model.notice = None;

    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = analyze_image(&file).await;
        if let Err(message) = &outcome {
            log::warn!("{}", message);
        }
        link.send_message(Msg::AnalysisFinished(generation, outcome));
    });

    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    let files = event.data_transfer().and_then(|dt| dt.files());
    match files.as_ref().and_then(first_image_file) {
        Some(file) => ctx.link().send_message(Msg::FileChosen(file)),
        None => ctx.link().send_message(Msg::FileRejected(
            "Please drop a JPG, PNG or GIF image.".into(),
        )),
    }

    true
}
