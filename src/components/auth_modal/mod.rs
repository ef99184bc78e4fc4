//! Sign-in / sign-up modal.
//!
//! Pure view over the [`ModalState`] published by the credential modal
//! controller; every interaction is forwarded to it.

use leptos::ev;
use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_use::use_event_listener;
use wasm_bindgen_futures::spawn_local;

use crate::app::AuthContext;
use crate::components::icons as ic;
use crate::core::SubmitOutcome;
use crate::models::{FieldValidity, ModalState};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/auth_modal/modal.module.css");

fn field_class(validity: FieldValidity) -> String {
    match validity {
        FieldValidity::Untouched => css::input.to_string(),
        FieldValidity::Valid => format!("{} {}", css::input, css::inputValid),
        FieldValidity::Invalid => format!("{} {}", css::input, css::inputInvalid),
    }
}

#[component]
pub fn AuthModal() -> impl IntoView {
    let ctx = use_context::<AuthContext>().expect("AuthContext must be provided at root");
    let state = ctx.modal;

    let _ = use_event_listener(document(), ev::keydown, move |e: ev::KeyboardEvent| {
        if e.key() == "Escape" {
            ctx.credential_modal().handle_escape();
        }
    });

    let copy = Memo::new(move |_| state.with(ModalState::copy));
    let is_open = Memo::new(move |_| state.with(|s| s.is_open));
    let submitting = Memo::new(move |_| state.with(ModalState::is_submitting));

    let on_submit = move |e: ev::SubmitEvent| {
        e.prevent_default();
        let modal = ctx.credential_modal();
        spawn_local(async move {
            if let SubmitOutcome::Failed(err) = modal.submit_form().await {
                dom::warn(&format!("auth request failed: {err}"));
            }
        });
    };

    view! {
        <div
            class=css::overlay
            style:display=move || if is_open.get() { "flex" } else { "none" }
            on:click=move |_| ctx.credential_modal().close()
        >
            <div class=css::modal on:click=|e: ev::MouseEvent| e.stop_propagation()>
                <div class=css::header>
                    <h2>{move || copy.get().title}</h2>
                    <button
                        class=css::close
                        title="Close"
                        on:click=move |_| ctx.credential_modal().close()
                    >
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>

                <div class=css::content>
                    <form class=css::form on:submit=on_submit>
                        <fieldset
                            class=css::fields
                            disabled=move || submitting.get()
                        >
                            <div class=css::group>
                                <label for="auth-email">"Email Address"</label>
                                <input
                                    id="auth-email"
                                    type="email"
                                    name="email"
                                    required
                                    class=move || state.with(|s| field_class(s.email.validity))
                                    prop:value=move || state.with(|s| s.email.value.clone())
                                    on:input=move |e| {
                                        ctx.credential_modal().set_email(event_target_value(&e))
                                    }
                                    on:blur=move |_| ctx.credential_modal().blur_email()
                                />
                            </div>
                            <div class=css::group>
                                <label for="auth-password">"Password"</label>
                                <input
                                    id="auth-password"
                                    type="password"
                                    name="password"
                                    required
                                    class=move || state.with(|s| field_class(s.password.validity))
                                    prop:value=move || state.with(|s| s.password.value.clone())
                                    on:input=move |e| {
                                        ctx.credential_modal().set_password(event_target_value(&e))
                                    }
                                    on:blur=move |_| ctx.credential_modal().blur_password()
                                />
                            </div>
                            <button type="submit" class=css::submit>
                                {move || copy.get().submit_label}
                            </button>
                        </fieldset>
                    </form>

                    <div class=css::divider>
                        <span>"or"</span>
                    </div>

                    <div class=css::switch>
                        <p>{move || copy.get().switch_prompt}</p>
                        <button
                            type="button"
                            class=css::switchButton
                            on:click=move |_| ctx.credential_modal().toggle_mode()
                        >
                            {move || copy.get().switch_label}
                        </button>
                    </div>
                </div>

                <Show when=move || submitting.get()>
                    <div class=css::loading>
                        <span class=css::spinner><Icon icon=ic::SPINNER /></span>
                        <p>"Processing..."</p>
                    </div>
                </Show>

                {move || state.with(|s| s.notice.clone()).map(|notice| {
                    let (class, icon) = if notice.is_error() {
                        (css::error, ic::ALERT)
                    } else {
                        (css::success, ic::SUCCESS)
                    };
                    view! {
                        <div class=class>
                            <Icon icon=icon />
                            <span>{notice.text().to_string()}</span>
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
