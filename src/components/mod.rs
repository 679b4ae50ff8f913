pub mod app_shell;
pub mod city_detail;
pub mod city_form;
pub mod city_list;
pub mod country_list;
pub mod home;
pub mod login_page;
pub mod map_view;
pub mod message;
pub mod root;
pub mod spinner;
pub mod user_badge;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use app_shell::{AppShell, AppShellProps};
pub use city_detail::{CityDetail, CityDetailProps};
pub use city_form::{CityForm, CityFormProps};
pub use city_list::{CityList, CityListProps, EMPTY_LIST_MESSAGE};
pub use country_list::{CountryList, CountryListProps};
pub use home::{HomePage, HomePageProps};
pub use login_page::{LoginPage, LoginPageProps};
pub use map_view::{MapView, MapViewProps};
pub use message::{Message, MessageProps};
pub use root::{Root, RootProps};
pub use spinner::{Spinner, SpinnerProps};
pub use user_badge::{UserBadge, UserBadgeProps};
