use yew::prelude::*;
use yew_router::prelude::*;
use crate::router::Route;
use super::status::ServiceStatus;

fn nav_links(link_class: &'static str) -> Html {
    html! {
        <>
            <li><Link<Route> to={Route::Home} classes={classes!(link_class)}><i class="fas fa-home w-5"></i>{" Home"}</Link<Route>></li>
            <li><Link<Route> to={Route::Predict} classes={classes!(link_class)}><i class="fas fa-heartbeat w-5"></i>{" Predict"}</Link<Route>></li>
            <li><Link<Route> to={Route::History} classes={classes!(link_class)}><i class="fas fa-history w-5"></i>{" History"}</Link<Route>></li>
            <li><Link<Route> to={Route::About} classes={classes!(link_class)}><i class="fas fa-info-circle w-5"></i>{" About"}</Link<Route>></li>
            <li><Link<Route> to={Route::Settings} classes={classes!(link_class)}><i class="fas fa-cog w-5"></i>{" Settings"}</Link<Route>></li>
        </>
    }
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="navbar-start">
                <div class="dropdown">
                    <div tabindex="0" role="button" class="btn btn-ghost lg:hidden">
                        <i class="fas fa-bars text-xl"></i>
                    </div>
                    <ul tabindex="0" class="menu menu-sm dropdown-content mt-3 z-[1] p-2 shadow bg-base-100 rounded-box w-52">
                        { nav_links("text-base-content") }
                    </ul>
                </div>
                <Link<Route> to={Route::Home} classes="btn btn-ghost text-xl">
                    <i class="fas fa-tint text-primary"></i>{" DiaRisk"}
                </Link<Route>>
            </div>
            <div class="navbar-center hidden lg:flex">
                <ul class="menu menu-horizontal px-1">
                    { nav_links("btn btn-ghost btn-sm") }
                </ul>
            </div>
            <div class="navbar-end">
                <ServiceStatus />
            </div>
        </div>
    }
}
