use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::filters::card_usage;
use crate::format::{format_currency, format_percent};
use crate::forms::CardForm;
use crate::models::{Account, CreditCard, Expense};
use crate::ui::components::{
    alert, bind_select, bind_text, confirm, empty_row, id_options, input_field, loading_row,
    page_shell, primary_button, report_error, select_field, use_api, use_list, FormMode, Modal,
};

#[function_component(CardsPage)]
pub fn cards_page() -> Html {
    let api = use_api();
    let version = use_state(|| 0u32);
    let cards = use_list::<CreditCard>(api::CARDS.to_string(), *version);
    let accounts = use_list::<Account>(api::ACCOUNTS.to_string(), 0);
    let expenses = use_list::<Expense>(api::EXPENSES.to_string(), *version);

    let mode = use_state(|| FormMode::Closed);
    let form = use_state(CardForm::default);
    let saving = use_state(|| false);

    let on_new = {
        let mode = mode.clone();
        let form = form.clone();
        Callback::from(move |_: MouseEvent| {
            form.set(CardForm::default());
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
                match api.save::<_, CreditCard>(api::CARDS, record.id, &record).await {
                    Ok(_) => {
                        mode.set(FormMode::Closed);
                        version.set(*version + 1);
                    }
                    Err(err) => report_error("Não foi possível salvar o cartão", &err),
                }
                saving.set(false);
            });
        })
    };

    let edit = {
        let mode = mode.clone();
        let form = form.clone();
        move |card: &CreditCard| {
            let mode = mode.clone();
            let form = form.clone();
            let card = card.clone();
            Callback::from(move |_: MouseEvent| {
                if let Some(id) = card.id {
                    form.set(CardForm::from_record(&card));
                    mode.set(FormMode::Edit(id));
                }
            })
        }
    };

    let remove = {
        let api = api.clone();
        let version = version.clone();
        move |card: &CreditCard| {
            let api = api.clone();
            let version = version.clone();
            let id = card.id;
            let name = card.name.clone();
            Callback::from(move |_: MouseEvent| {
                let Some(id) = id else { return };
                if !confirm(&format!("Excluir o cartão \"{}\"?", name)) {
                    return;
                }
                let api = api.clone();
                let version = version.clone();
                spawn_local(async move {
                    match api.delete(api::CARDS, id).await {
                        Ok(()) => version.set(*version + 1),
                        Err(err) => report_error("Não foi possível excluir o cartão", &err),
                    }
                });
            })
        }
    };

    let usage = match (cards.as_ref(), expenses.as_ref()) {
        (Some(cards), Some(expenses)) => Some(card_usage(cards, expenses)),
        _ => None,
    };

    let account_options = id_options(
        accounts.as_deref().unwrap_or(&[]),
        "Nenhuma",
        |a: &Account| (a.id, a.name.clone()),
    );

    page_shell(
        "Cartões de crédito",
        primary_button("Novo cartão", on_new),
        html! {
            <>
                <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-x-auto">
                    <table class="w-full text-sm">
                        <thead class="bg-slate-50 text-left text-muted-foreground">
                            <tr>
                                <th class="p-3">{"Cartão"}</th>
                                <th class="p-3">{"Fechamento"}</th>
                                <th class="p-3">{"Vencimento"}</th>
                                <th class="p-3 text-right">{"Limite"}</th>
                                <th class="p-3 text-right">{"Em aberto"}</th>
                                <th class="p-3 text-right">{"Disponível"}</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                match usage {
                                    None => loading_row(7),
                                    Some(list) if list.is_empty() => empty_row(7, "Nenhum cartão cadastrado."),
                                    Some(list) => html! {
                                        { for list.iter().map(|row| html! {
                                            <tr class="border-t border-border">
                                                <td class="p-3 font-medium">
                                                    { row.card.name.clone() }
                                                    <span class="ml-2 text-xs text-muted-foreground">{ row.card.brand.clone().unwrap_or_default() }</span>
                                                </td>
                                                <td class="p-3">{ format!("Dia {}", row.card.closing_day) }</td>
                                                <td class="p-3">{ format!("Dia {}", row.card.due_day) }</td>
                                                <td class="p-3 text-right">{ format_currency(row.card.limit) }</td>
                                                <td class="p-3 text-right">
                                                    { format_currency(row.used) }
                                                    <span class="ml-1 text-xs text-muted-foreground">{ format!("({})", format_percent(row.usage_pct)) }</span>
                                                </td>
                                                <td class={if row.available < 0.0 { "p-3 text-right text-red-600" } else { "p-3 text-right" }}>
                                                    { format_currency(row.available) }
                                                </td>
                                                <td class="p-3 text-right space-x-2">
                                                    <button onclick={edit(&row.card)} class="text-primary">{"Editar"}</button>
                                                    <button onclick={remove(&row.card)} class="text-red-600">{"Excluir"}</button>
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
                            <Modal title={mode.title("Novo cartão", "Editar cartão")} on_close={on_close} on_save={on_save} saving={*saving}>
                                { input_field("Nome", "text", &form.name, bind_text(&form, |f, v| f.name = v)) }
                                { input_field("Bandeira", "text", &form.brand, bind_text(&form, |f, v| f.brand = v)) }
                                { input_field("Limite", "text", &form.limit, bind_text(&form, |f, v| f.limit = v)) }
                                { select_field("Conta de pagamento", &form.account_id, account_options, bind_select(&form, |f, v| f.account_id = v)) }
                                { input_field("Dia de fechamento", "number", &form.closing_day, bind_text(&form, |f, v| f.closing_day = v)) }
                                { input_field("Dia de vencimento", "number", &form.due_day, bind_text(&form, |f, v| f.due_day = v)) }
                            </Modal>
                        }
                    } else {
                        html! {}
                    }
                }
            </>
        },
    )
}
