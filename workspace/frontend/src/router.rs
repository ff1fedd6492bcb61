use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::layout::Layout;
use crate::components::settings::view::Settings;
use crate::pages::about::About;
use crate::pages::history::HistoryPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::predict::PredictPage;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/predict")]
    Predict,
    #[at("/history")]
    History,
    #[at("/about")]
    About,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering Home page");
            html! { <Layout title="Home"><Home /></Layout> }
        }
        Route::Predict => {
            log::trace!("Rendering Predict page");
            html! { <Layout title="Predict"><PredictPage /></Layout> }
        }
        Route::History => {
            log::trace!("Rendering History page");
            html! { <Layout title="History"><HistoryPage /></Layout> }
        }
        Route::About => {
            log::trace!("Rendering About page");
            html! { <Layout title="About"><About /></Layout> }
        }
        Route::Settings => {
            log::trace!("Rendering Settings page");
            html! { <Layout title="Settings"><Settings /></Layout> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><NotFound /></Layout> }
        }
    }
}
