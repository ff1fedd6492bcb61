use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="hero py-24">
            <div class="hero-content text-center">
                <div>
                    <h1 class="text-6xl font-bold">{"404"}</h1>
                    <p class="py-6">{"This page does not exist."}</p>
                    <Link<Route> to={Route::Home} classes="btn btn-primary">{"Back to Home"}</Link<Route>>
                </div>
            </div>
        </div>
    }
}
