//! Create/edit modal driven by a [`FormModalState`].
//!
//! The component renders nothing while the form is closed. Opening and
//! seeding the draft is the caller's job (`open_create` / `open_edit`);
//! this view edits the draft, stages the attachment, and runs the submit
//! request.

use crate::shared::api_utils::{to_form_data, use_api, ApiClient};
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::shared::descriptor::{EntityDescriptor, FieldKind, FormField};
use contracts::shared::error::ApiError;
use contracts::shared::form_state::{
    FormModalState, FormMode, StagedFile, SubmitBody, Submission, SAVE_FAILED,
};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

pub const SUBMITTING: &str = "Submitting...";

async fn send_submission(
    api: &ApiClient,
    descriptor: &EntityDescriptor,
    scope: &[String],
    submission: Submission,
    file: Option<File>,
) -> Result<(), ApiError> {
    let scope: Vec<&str> = scope.iter().map(String::as_str).collect();
    let (path, edit) = match &submission.mode {
        FormMode::Create => (descriptor.create_path(&scope)?, false),
        FormMode::Edit { id } => (descriptor.update_path(&scope, id)?, true),
    };

    match (submission.body, edit) {
        (SubmitBody::Json(body), true) => api.patch_json(&path, &body).await?,
        (SubmitBody::Json(body), false) => api.post_json(&path, &body).await?,
        (SubmitBody::Multipart(parts), false) => {
            api.post_form(&path, to_form_data(&parts, file.as_ref())?).await?
        }
        // attachment entities have no update endpoint
        (SubmitBody::Multipart(_), true) => {
            return Err(ApiError::InvalidRequest(format!("{path}: multipart update")))
        }
    };
    Ok(())
}

fn field_input(
    field: &'static FormField,
    form: RwSignal<FormModalState>,
    on_blur: Option<Callback<(&'static str, String)>>,
) -> AnyView {
    let path = field.path;
    let value = move || form.with(|f| f.value(path).to_string());
    let set = move |raw: String| {
        form.update(|f| {
            f.set_field(path, raw);
        });
    };
    let blur = move |ev: ev::FocusEvent| {
        if let Some(cb) = on_blur {
            cb.run((path, event_target_value(&ev)));
        }
    };
    let disabled = move || form.with(|f| f.is_submitting());

    match field.kind {
        FieldKind::Text | FieldKind::Date | FieldKind::Number => {
            let input_type = match field.kind {
                FieldKind::Date => "date",
                FieldKind::Number => "number",
                _ => "text",
            };
            view! {
                <input
                    class="form__input"
                    type=input_type
                    step=(field.kind == FieldKind::Number).then_some("any")
                    name=path
                    required=field.required
                    disabled=disabled
                    prop:value=value
                    on:input=move |ev| set(event_target_value(&ev))
                    on:blur=blur
                />
            }
            .into_any()
        }
        FieldKind::TextArea => view! {
            <textarea
                class="form__textarea"
                name=path
                rows="3"
                disabled=disabled
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Bool => view! {
            <input
                class="form__checkbox"
                type="checkbox"
                name=path
                disabled=disabled
                prop:checked=move || form.with(|f| f.value(path) == "true")
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select
                class="form__select"
                name=path
                disabled=disabled
                prop:value=value
                on:change=move |ev| set(event_target_value(&ev))
            >
                {field.default.is_empty().then(|| view! { <option value="">"Select..."</option> })}
                {options
                    .iter()
                    .map(|opt| view! { <option value=*opt>{*opt}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
    }
}

fn format_size(size: u64) -> String {
    if size >= 1024 * 1024 {
        format!("{:.1} MB", size as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} KB", size as f64 / 1024.0)
    }
}

/// Single-file drop zone. Dropping or browsing again replaces the staged file.
#[component]
fn AttachmentInput(
    label: &'static str,
    form: RwSignal<FormModalState>,
    file_handle: RwSignal<Option<File>, LocalStorage>,
) -> impl IntoView {
    let drag_active = RwSignal::new(false);
    let file_input: NodeRef<html::Input> = NodeRef::new();

    let stage = move |file: File| {
        let staged = StagedFile {
            name: file.name(),
            size: file.size() as u64,
        };
        let accepted = form.try_update(|f| f.stage_file(staged)).unwrap_or(false);
        if accepted {
            file_handle.set(Some(file));
        }
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        drag_active.set(false);
        if let Some(file) = ev
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            stage(file);
        }
    };

    let on_pick = move |ev: ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            stage(file);
        }
        // picking the same file again must fire `change`
        input.set_value("");
    };

    let clear = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        form.update(|f| f.clear_file());
        file_handle.set(None);
    };

    view! {
        <div class="form__group">
            <label class="form__label">{label}</label>
            <input
                type="file"
                accept="image/*"
                style="display: none;"
                node_ref=file_input
                on:change=on_pick
            />
            <div
                class="drop-zone"
                class:drop-zone--active=move || drag_active.get()
                on:dragover=move |ev: ev::DragEvent| {
                    ev.prevent_default();
                    drag_active.set(true);
                }
                on:dragleave=move |_| drag_active.set(false)
                on:drop=on_drop
                on:click=move |_| {
                    if let Some(input) = file_input.get() {
                        input.click();
                    }
                }
            >
                {move || match form.with(|f| f.staged().cloned()) {
                    Some(file) => view! {
                        <div class="drop-zone__file">
                            <span>{file.name}</span>
                            <span class="drop-zone__size">{format_size(file.size)}</span>
                            <button class="button button--icon" title="Remove" on:click=clear>
                                {icon("x")}
                            </button>
                        </div>
                    }
                    .into_any(),
                    None => view! {
                        <div class="drop-zone__hint">
                            {icon("upload")}
                            <span>"Drag a file here or click to browse"</span>
                        </div>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
pub fn FormModal(
    descriptor: &'static EntityDescriptor,
    form: RwSignal<FormModalState>,
    /// Parent ids filling the create/update path
    #[prop(into)]
    scope: Signal<Vec<String>>,
    on_saved: Callback<()>,
    /// Field left focus: `(path, value)`
    #[prop(optional)]
    on_blur: Option<Callback<(&'static str, String)>>,
    /// Extra inputs below the fields
    #[prop(optional)]
    extra: Option<ChildrenFn>,
    /// Final JSON body rewrite; an `Err` is shown instead of sending
    #[prop(optional)]
    augment: Option<Callback<Value, Result<Value, String>>>,
    /// Informational line above the fields
    #[prop(into, optional)]
    notice: Signal<Option<String>>,
    /// Error shown when the server sends no message
    #[prop(default = SAVE_FAILED)]
    failure_text: &'static str,
) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let file_handle = RwSignal::new_local(None::<File>);
    let extra = StoredValue::new(extra);

    // the handle follows the staged metadata (reset after create, close)
    Effect::new(move |_| {
        if form.with(|f| f.staged().is_none()) {
            file_handle.set(None);
        }
    });

    let busy = Signal::derive(move || form.with(|f| f.is_submitting()));
    let title = Signal::derive(move || {
        if form.with(|f| f.is_edit()) {
            descriptor.add_label.replacen("Add", "Edit", 1)
        } else {
            descriptor.add_label.to_string()
        }
    });

    let close = Callback::new(move |_: ()| {
        form.update(|f| {
            f.close();
        });
    });

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Ok(mut submission)) = form.try_update(|f| f.begin_submit()) else {
            return;
        };
        if let (Some(augment), SubmitBody::Json(body)) = (augment, &submission.body) {
            match augment.run(body.clone()) {
                Ok(body) => submission.body = SubmitBody::Json(body),
                Err(message) => {
                    form.update(|f| f.finish_error(message));
                    return;
                }
            }
        }

        let api = api.get_value();
        let scope = scope.get_untracked();
        let file = file_handle.get_untracked();
        spawn_local(async move {
            match send_submission(&api, descriptor, &scope, submission, file).await {
                Ok(()) => {
                    log::info!("{} saved", descriptor.key);
                    form.update(|f| f.finish_success());
                    on_saved.run(());
                }
                Err(err) => {
                    log::error!("Saving {} failed: {}", descriptor.key, err);
                    form.update(|f| f.finish_error(err.user_message(failure_text)));
                }
            }
        });
    };

    view! {
        <Show when=move || form.with(|f| f.is_open())>
            <ModalFrame title=title on_close=close busy=busy>
                <form class="form" on:submit=submit novalidate=true>
                    {move || notice.get().map(|text| view! { <div class="info-box">{text}</div> })}

                    {descriptor
                        .form
                        .fields
                        .iter()
                        .map(|field| {
                            let marker = if field.required { " *" } else { "" };
                            view! {
                                <div class="form__group">
                                    <label class="form__label">{field.label}{marker}</label>
                                    {field_input(field, form, on_blur)}
                                </div>
                            }
                        })
                        .collect_view()}

                    {descriptor.form.attachment.map(|attachment| view! {
                        <AttachmentInput
                            label=attachment.label
                            form=form
                            file_handle=file_handle
                        />
                    })}

                    {extra.get_value().map(|children| children())}

                    {move || {
                        form.with(|f| f.error().map(str::to_string))
                            .map(|message| view! { <div class="error-box">{message}</div> })
                    }}

                    <div class="form__actions">
                        <button
                            type="button"
                            class="button button--secondary"
                            disabled=move || busy.get()
                            on:click=move |_| close.run(())
                        >
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="button button--primary"
                            disabled=move || busy.get()
                        >
                            {move || if busy.get() { SUBMITTING } else { "Submit" }}
                        </button>
                    </div>
                </form>
            </ModalFrame>
        </Show>
    }
}
