use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::forms::AccountForm;
use crate::format::format_currency;
use crate::models::{Account, AccountKind};
use crate::ui::components::{
    alert, bind_select, bind_text, confirm, empty_row, input_field, loading_row, page_shell,
    primary_button, report_error, select_field, use_api, use_list, FormMode, Modal, StatCard,
    StatIcon,
};

#[function_component(AccountsPage)]
pub fn accounts_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let accounts = use_list::<Account>(api::ACCOUNTS.to_string(), *version);

    let mode = use_state(|| FormMode::Closed);
    let form = use_state(AccountForm::default);
    let saving = use_state(|| false);

    let on_new = {
        let mode = mode.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(AccountForm {
                kind: AccountKind::Corrente.code().to_string(),
                ..AccountForm::default()
            });
            mode.set(FormMode::Create);
        })
    };

    let on_close = {
        let mode = mode.clone();
        Callback::from(move |_: ()| mode.set(FormMode::Closed))
    };

    let on_save = {
        let api = api.clone();
        let form = form.clone();
        let mode = mode.clone();
        let saving = saving.clone();
        let version = version.clone();
        Callback::from(move |_: ()| {
            let record = match form.to_record(mode.id()) {
                Ok(record) => record,
                Err(err) => {
                    alert(&err.to_string());
                    return;
                }
            };
            let api = api.clone();
            let mode = mode.clone();
            let saving = saving.clone();
            let version = version.clone();
            saving.set(true);
            spawn_local(async move {
                match api.save::<_, Account>(api::ACCOUNTS, record.id, &record).await {
                    Ok(saved) => {
                        tracing::info!(id = ?saved.id, "account saved");
                        mode.set(FormMode::Closed);
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar a conta", &err),
                }
                saving.set(false);
            });
        })
    };

    let edit = {
        let mode = mode.clone();
        let form = form.clone();
        move |account: &Account| {
            let mode = mode.clone();
            let form = form.clone();
            let account = account.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = account.id {
                    form.set(AccountForm::from_record(&account));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let remove = {
        let api = api.clone();
        let version = version.clone();
        move |account: &Account| {
            let api = api.clone();
            let version = version.clone();
            let id = account.id;
            let name = account.name.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir a conta \"{}\"?", name)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                spawn_local(async move {
                    match api.delete(api::ACCOUNTS, id).await {
                        Ok(()) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível excluir a conta", &err),
                    }
                });
            })
        }
    };

    let total_balance: f64 = accounts
        .as_ref()
        .map(|list| list.iter().filter(|a| a.active).map(|a| a.balance()).sum())
        .unwrap_or(0.0);

    let kind_options: Vec<(String, String)> = AccountKind::ALL
        .iter()
        .map(|k| (k.code().to_string(), k.label().to_string()))
        .collect();

    page_shell(
        "Contas bancárias",
        primary_button("Nova conta", on_new),
        html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard title="Saldo total" amount={total_balance} icon={StatIcon::Wallet} />
                </div>

                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                    <table class="w-full text-sm">
                        <thead class="bg-slate-50 text-left text-muted-foreground">
                            <tr>
                                <th class="p-3">{"Conta"}</th>
                                <th class="p-3">{"Banco"}</th>
                                <th class="p-3">{"Tipo"}</th>
                                <th class="p-3 text-right">{"Saldo"}</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                match accounts.as_ref() {
                                    None => loading_row(5),
                                    Some(list) if list.is_empty() => empty_row(5, "Nenhuma conta cadastrada."),
                                    Some(list) => html! {
                                        { for list.iter().map(|account| html! {
                                            <tr class="border-t border-border">
                                                <td class="p-3 font-medium">{ account.name.clone() }</td>
                                                <td class="p-3">{ account.bank.clone().unwrap_or_default() }</td>
                                                <td class="p-3">{ account.kind.label() }</td>
                                                <td class={if account.balance() < 0.0 { "p-3 text-right text-red-600" } else { "p-3 text-right" }}>
                                                    { format_currency(account.balance()) }
                                                </td>
                                                <td class="p-3 text-right space-x-2">
                                                    <button onclick={edit(account)} class="text-primary">{"Editar"}</button>
                                                    <button onclick={remove(account)} class="text-red-600">{"Excluir"}</button>
                                                </td>
                                            </tr>
                                        }) }
                                    },
                                }
                            }
                        </tbody>
                    </table>
                </div>

                {
                    if mode.is_open() {
                        html! {
                            <Modal title={mode.title("Nova conta", "Editar conta")} on_close={on_close} on_save={on_save} saving={*saving}>
                                { input_field("Nome", "text", &form.name, bind_text(&form, |f, v| f.name = v)) }
                                { input_field("Banco", "text", &form.bank, bind_text(&form, |f, v| f.bank = v)) }
                                { select_field("Tipo", &form.kind, kind_options, bind_select(&form, |f, v| f.kind = v)) }
                                { input_field("Saldo inicial", "text", &form.opening_balance, bind_text(&form, |f, v| f.opening_balance = v)) }
                            </Modal>
                        }
                    } else {
                        html! {}
                    }
                }
            </>
        }
    )
}
