//! Auth-dependent part of the navigation bar.
//!
//! Renders whatever [`NavView`] the session synchronizer last produced:
//! log-in/sign-up buttons for guests, an avatar with an account dropdown
//! for members.

use leptos::prelude::*;
use leptos_icons::Icon;
use leptos_use::on_click_outside;
use wasm_bindgen_futures::spawn_local;

use crate::app::AuthContext;
use crate::components::icons as ic;
use crate::models::{ModalMode, NavView};

stylance::import_crate_style!(css, "src/components/nav/nav.module.css");

#[component]
pub fn NavAuth() -> impl IntoView {
    let ctx = use_context::<AuthContext>().expect("AuthContext must be provided at root");

    view! {
        <div class=css::navButtons>
            {move || match ctx.nav.get() {
                NavView::Guest => view! { <GuestButtons /> }.into_any(),
                NavView::Member { initial, email, dropdown_open } => {
                    view! { <UserMenu initial=initial email=email open=dropdown_open /> }
                        .into_any()
                }
            }}
        </div>
    }
}

#[component]
fn GuestButtons() -> impl IntoView {
    let ctx = use_context::<AuthContext>().expect("AuthContext must be provided at root");

    view! {
        <button class=css::secondary on:click=move |_| ctx.open_modal(ModalMode::SignIn)>
            "Log In"
        </button>
        <button class=css::primary on:click=move |_| ctx.open_modal(ModalMode::SignUp)>
            "Sign Up"
        </button>
    }
}

/// Avatar trigger plus dropdown.
///
/// Clicks anywhere outside the menu close the dropdown; clicks inside it
/// are left alone.
#[component]
fn UserMenu(initial: String, email: String, open: bool) -> impl IntoView {
    let ctx = use_context::<AuthContext>().expect("AuthContext must be provided at root");
    let menu_ref = NodeRef::<leptos::html::Div>::new();

    let _ = on_click_outside(menu_ref, move |_| ctx.sync().click_outside());

    let toggle = move |_: leptos::ev::MouseEvent| ctx.sync().toggle_dropdown();
    let inside = move |_: leptos::ev::MouseEvent| ctx.sync().click_inside();
    let sign_out = move |_: leptos::ev::MouseEvent| {
        let sync = ctx.sync();
        spawn_local(async move { sync.sign_out().await });
    };

    let dropdown_class = if open {
        format!("{} {}", css::dropdown, css::active)
    } else {
        css::dropdown.to_string()
    };

    view! {
        <div class=css::userMenu node_ref=menu_ref>
            <button class=css::avatar title=email.clone() on:click=toggle>
                <span>{initial}</span>
            </button>
            <div class=dropdown_class on:click=inside>
                <div class=css::userInfo>
                    <Icon icon=ic::USER />
                    <p class=css::email>{email}</p>
                </div>
                <div class=css::divider></div>
                <a href="#dashboard" class=css::item>
                    <Icon icon=ic::DASHBOARD />
                    "Dashboard"
                </a>
                <a href="#settings" class=css::item>
                    <Icon icon=ic::SETTINGS />
                    "Settings"
                </a>
                <div class=css::divider></div>
                <button class=css::item on:click=sign_out>
                    <Icon icon=ic::SIGN_OUT />
                    "Sign Out"
                </button>
            </div>
        </div>
    }
}
