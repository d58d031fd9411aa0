use yew::prelude::*;
use yew_router::prelude::*;

mod companies_and_contacts;
mod config;
mod emails_checked_by_john;
mod styles;

use crate::{
    companies_and_contacts::CompaniesAndContacts,
    config::Config,
    emails_checked_by_john::EmailsCheckedByJohn,
};

// No route is mounted at "/"; the navigation bar is always visible and
// links to the two pages.
#[derive(Clone, Debug, Routable, PartialEq)]
pub enum Route {
    #[at("/get-companies")] CompaniesAndContacts,
    #[at("/get-emails-checked-by-john")] EmailsCheckedByJohn,
}

#[function_component(Navigation)]
fn navigation() -> Html {
    let current_route = use_route::<Route>();

    html! {
        <nav class="bg-gray-900 shadow-lg fixed top-0 w-full z-50">
            <div class="container mx-auto px-6 py-4 flex justify-center space-x-8">
                <Link<Route> to={Route::CompaniesAndContacts} classes={classes!(
                    "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
                    "transition-colors", "duration-200", "ease-in-out",
                    "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
                    if current_route == Some(Route::CompaniesAndContacts) {
                        "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
                    } else {
                        ""
                    }
                )}>
                    {"Companies & Contacts"}
                </Link<Route>>
                <Link<Route> to={Route::EmailsCheckedByJohn} classes={classes!(
                    "text-base", "md:text-lg", "font-medium", "px-4", "py-2", "rounded-md",
                    "transition-colors", "duration-200", "ease-in-out",
                    "text-gray-200", "border", "border-transparent", "hover:border-blue-400", "hover:text-blue-400",
                    if current_route == Some(Route::EmailsCheckedByJohn) {
                        "text-blue-400 border-blue-400 ring-2 ring-blue-500 ring-offset-1 ring-offset-gray-900"
                    } else {
                        ""
                    }
                )}>
                    {"Emails Checked By John"}
                </Link<Route>>
            </div>
        </nav>
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = Config::from_build_env();

    html! {
        <ContextProvider<Config> context={config}>
            <BrowserRouter>
                <div class="min-h-screen bg-gray-900">
                    <Navigation />
                    <div class="pt-16">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </BrowserRouter>
        </ContextProvider<Config>>
    }
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::CompaniesAndContacts => html! { <CompaniesAndContacts /> },
        Route::EmailsCheckedByJohn => html! { <EmailsCheckedByJohn /> },
    }
}

fn main() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::Route;
    use yew_router::Routable;

    #[test]
    fn test_route_paths_match_the_served_urls() {
        assert_eq!(Route::CompaniesAndContacts.to_path(), "/get-companies");
        assert_eq!(Route::EmailsCheckedByJohn.to_path(), "/get-emails-checked-by-john");
    }

    #[test]
    fn test_only_the_two_pages_are_routed() {
        assert_eq!(Route::recognize("/get-companies"), Some(Route::CompaniesAndContacts));
        assert_eq!(
            Route::recognize("/get-emails-checked-by-john"),
            Some(Route::EmailsCheckedByJohn)
        );
        assert_eq!(Route::recognize("/"), None);
    }
}
