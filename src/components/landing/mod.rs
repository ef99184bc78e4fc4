//! Landing page.
//!
//! Header with the auth-aware nav region, hero, pricing, and footer. CTA
//! buttons go through the sign-in gate before doing their own thing.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AuthContext;
use crate::components::auth_modal::AuthModal;
use crate::components::icons as ic;
use crate::components::nav::NavAuth;
use crate::config::{APP_NAME, APP_TAGLINE};
use crate::core::{CtaAction, CtaKind};
use crate::utils::dom;

stylance::import_crate_style!(css, "src/components/landing/landing.module.css");

/// How long a pricing button shows its loading state.
const PRICING_LOADING_MS: u32 = 2000;

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <header class=css::header>
            <nav class=css::nav>
                <a href="#" class=css::brand>
                    <Icon icon=ic::BRAND />
                    <span>{APP_NAME}</span>
                </a>
                <ul class=css::links>
                    <li><a href="#how-it-works">"How It Works"</a></li>
                    <li><a href="#pricing">"Pricing"</a></li>
                </ul>
                <NavAuth />
            </nav>
        </header>

        <main>
            <section class=css::hero>
                <h1>"Your AI co-pilot for the job hunt"</h1>
                <p>{APP_TAGLINE}</p>
                <div class=css::heroActions>
                    <CtaButton label="Get Started" target="#dashboard" primary=true />
                    <CtaButton label="Try Now" target="#dashboard" primary=false />
                </div>
            </section>

            <section id="how-it-works" class=css::steps>
                <h2>"How It Works"</h2>
                <ol>
                    <li>"Upload your resume"</li>
                    <li>"Pick the roles you want"</li>
                    <li>"Let JobAI tailor and send your applications"</li>
                </ol>
            </section>

            <section id="pricing" class=css::pricing>
                <h2>"Pricing"</h2>
                <div class=css::cards>
                    <PricingCard plan="Starter" price="$0" action="Start Free Trial" />
                    <PricingCard plan="Pro" price="$19" action="Choose Pro" />
                    <PricingCard plan="Team" price="$49" action="Choose Team" />
                </div>
            </section>
        </main>

        <footer class=css::footer>
            <p>{format!("© {APP_NAME}")}</p>
        </footer>

        <AuthModal />
    }
}

/// Primary or outline button gated by its label.
#[component]
fn CtaButton(label: &'static str, target: &'static str, primary: bool) -> impl IntoView {
    let ctx = use_context::<AuthContext>().expect("AuthContext must be provided at root");

    let on_click = move |_: leptos::ev::MouseEvent| {
        if ctx.cta_click(CtaKind::Action, label) == CtaAction::Proceed {
            dom::set_hash(target);
        }
    };

    view! {
        <button class=if primary { css::primary } else { css::outline } on:click=on_click>
            {label}
            <Icon icon=ic::ARROW_RIGHT />
        </button>
    }
}

#[component]
fn PricingCard(plan: &'static str, price: &'static str, action: &'static str) -> impl IntoView {
    let ctx = use_context::<AuthContext>().expect("AuthContext must be provided at root");
    let loading = RwSignal::new(false);

    let on_click = move |_: leptos::ev::MouseEvent| {
        if loading.get_untracked() {
            return;
        }
        if ctx.cta_click(CtaKind::Pricing, action) == CtaAction::Proceed {
            loading.set(true);
            Timeout::new(PRICING_LOADING_MS, move || loading.set(false)).forget();
        }
    };

    view! {
        <div class=css::card>
            <h3>{plan}</h3>
            <p class=css::price>{price}<span>"/month"</span></p>
            <button class=css::primary disabled=move || loading.get() on:click=on_click>
                {move || if loading.get() {
                    view! { <Icon icon=ic::SPINNER />" Loading..." }.into_any()
                } else {
                    view! { {action} }.into_any()
                }}
            </button>
        </div>
    }
}
