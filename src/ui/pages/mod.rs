mod accounts;
mod cards;
mod categories;
mod dashboard;
mod expenses;
mod financing;
mod income;
mod settings;
mod vehicles;

pub use accounts::AccountsPage;
pub use cards::CardsPage;
pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use expenses::ExpensesPage;
pub use financing::FinancingPage;
pub use income::IncomePage;
pub use settings::SettingsPage;
pub use vehicles::VehiclesPage;
