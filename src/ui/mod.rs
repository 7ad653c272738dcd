//! Yew page controllers. Each page fetches its own lists, renders them and
//! posts forms back; pages share nothing but the settings context.

pub mod components;
pub mod pages;

use yew::prelude::*;

use crate::calendar::MonthRef;
use crate::config::{load_settings, AppSettings};
use components::{
    icon_bank, icon_bar_chart, icon_calendar, icon_car, icon_credit_card, icon_layout_grid,
    icon_settings, icon_tag, icon_trending_down, icon_trending_up,
};
use pages::{
    AccountsPage, CardsPage, CategoriesPage, DashboardPage, ExpensesPage, FinancingPage,
    IncomePage, SettingsPage, VehiclesPage,
};

#[derive(Clone, Copy, PartialEq)]
pub enum Page {
    Dashboard,
    Accounts,
    Cards,
    Categories,
    Expenses,
    Income,
    Vehicles,
    Financing,
    Settings,
}

#[derive(Properties, PartialEq)]
struct LayoutProps {
    children: Children,
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Layout)]
fn layout(props: &LayoutProps) -> Html {
    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex">
                <Sidebar active_page={props.active_page} on_select={props.on_select.clone()} />
            </div>

            <div class="flex-1 flex flex-col overflow-hidden">
                <Header />
                <main class="flex-1 overflow-y-auto">
                    { for props.children.iter() }
                </main>
            </div>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let today = MonthRef::today();
    html! {
        <header class="bg-[#D8E1E8] border-b border-border h-16 flex items-center justify-between px-6">
            <div class="flex-1"></div>
            <div class="flex items-center gap-2 text-sm text-[#173E63] font-bold">
                { icon_calendar() }
                <span>{ today.label() }</span>
            </div>
        </header>
    }
}

struct NavItem {
    label: &'static str,
    page: Page,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
struct SidebarProps {
    active_page: Page,
    on_select: Callback<Page>,
}

#[function_component(Sidebar)]
fn sidebar(props: &SidebarProps) -> Html {
    let nav_items = vec![
        NavItem {
            label: "Resumo",
            page: Page::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Contas",
            page: Page::Accounts,
            icon: icon_bank,
        },
        NavItem {
            label: "Cartões",
            page: Page::Cards,
            icon: icon_credit_card,
        },
        NavItem {
            label: "Categorias",
            page: Page::Categories,
            icon: icon_tag,
        },
        NavItem {
            label: "Despesas",
            page: Page::Expenses,
            icon: icon_trending_down,
        },
        NavItem {
            label: "Receitas",
            page: Page::Income,
            icon: icon_trending_up,
        },
        NavItem {
            label: "Veículos",
            page: Page::Vehicles,
            icon: icon_car,
        },
        NavItem {
            label: "Financiamentos",
            page: Page::Financing,
            icon: icon_bar_chart,
        },
        NavItem {
            label: "Configurações",
            page: Page::Settings,
            icon: icon_settings,
        },
    ];

    html! {
        <div class="w-[220px] h-screen bg-[#D8E1E8] p-4 flex flex-col">
            <div class="flex items-center gap-3 px-2 mb-8">
                <span class="text-[#173E63] text-2xl font-black tracking-tight">{"FinControl"}</span>
            </div>

            <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                <nav class="flex-1 space-y-2">
                    { for nav_items.iter().map(|item| {
                        let is_active = item.page == props.active_page;
                        let class_name = if is_active {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                        } else {
                            "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                        };
                        let on_select = props.on_select.clone();
                        let page = item.page;

                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_select.emit(page))}>
                                <span class="shrink-0">{ (item.icon)() }</span>
                                <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                            </button>
                        }
                    }) }
                </nav>
            </div>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let active_page = use_state(|| Page::Dashboard);
    let settings = use_state(load_settings);
    let on_select = {
        let active_page = active_page.clone();
        Callback::from(move |page: Page| active_page.set(page))
    };

    let content = match *active_page {
        Page::Dashboard => html! { <DashboardPage /> },
        Page::Accounts => html! { <AccountsPage /> },
        Page::Cards => html! { <CardsPage /> },
        Page::Categories => html! { <CategoriesPage /> },
        Page::Expenses => html! { <ExpensesPage /> },
        Page::Income => html! { <IncomePage /> },
        Page::Vehicles => html! { <VehiclesPage /> },
        Page::Financing => html! { <FinancingPage /> },
        Page::Settings => html! { <SettingsPage /> },
    };

    html! {
        <ContextProvider<UseStateHandle<AppSettings>> context={settings}>
            <Layout active_page={*active_page} on_select={on_select}>
                { content }
            </Layout>
        </ContextProvider<UseStateHandle<AppSettings>>>
    }
}
