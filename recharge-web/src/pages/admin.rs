use recharge_core::{AdminDashboard, Plan, PlanDraft, RechargeRecord};
use yew::prelude::*;

use crate::components::plan_form::PlanForm;
use crate::components::stat_card::StatCard;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// `None` while the dashboard is loading.
    pub dashboard: Option<AdminDashboard>,
    pub plans: Vec<Plan>,
    pub operators: Vec<String>,
    /// Preselected in the add form and used for plans without one.
    pub default_operator: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    pub on_create: Callback<PlanDraft>,
    pub on_update: Callback<(String, PlanDraft)>,
    pub on_delete: Callback<String>,
}

#[derive(Clone, PartialEq)]
enum Editor {
    Closed,
    Adding,
    Editing(Plan),
}

fn transaction_row(record: &RechargeRecord) -> Html {
    html! {
        <tr data-testid="transaction-row">
            <td>{ record.operator.clone() }</td>
            <td>{ record.user_label().to_string() }</td>
            <td>{ format!("₹{}", record.amount) }</td>
            <td>{ if record.phone_number.is_empty() { "N/A".to_string() } else { record.phone_number.clone() } }</td>
            <td>{ record.status_or_default().to_string() }</td>
            <td>{ record.display_date() }</td>
        </tr>
    }
}

#[function_component(AdminPage)]
pub fn admin_page(p: &Props) -> Html {
    let editor = use_state(|| Editor::Closed);

    let open_add = {
        let editor = editor.clone();
        Callback::from(move |_| editor.set(Editor::Adding))
    };
    let close = {
        let editor = editor.clone();
        Callback::from(move |()| editor.set(Editor::Closed))
    };

    let modal = match &*editor {
        Editor::Closed => Html::default(),
        Editor::Adding => {
            let on_submit = {
                let editor = editor.clone();
                let cb = p.on_create.clone();
                Callback::from(move |draft: PlanDraft| {
                    editor.set(Editor::Closed);
                    cb.emit(draft);
                })
            };
            html! {
                <PlanForm key="new" title="Add plan" initial={PlanDraft::with_operator(&p.default_operator)}
                    operators={p.operators.clone()} {on_submit} on_cancel={close.clone()} busy={p.busy} />
            }
        }
        Editor::Editing(plan) => {
            let on_submit = {
                let editor = editor.clone();
                let cb = p.on_update.clone();
                let id = plan.id.clone();
                Callback::from(move |draft: PlanDraft| {
                    editor.set(Editor::Closed);
                    cb.emit((id.clone(), draft));
                })
            };
            html! {
                <PlanForm key={plan.id.clone()} title="Edit plan" initial={PlanDraft::from_plan(plan, &p.default_operator)}
                    operators={p.operators.clone()} {on_submit} on_cancel={close.clone()} busy={p.busy} />
            }
        }
    };

    let stats_and_transactions = match &p.dashboard {
        None => html! { <p class="muted" role="status" data-testid="dashboard-loading">{ "Loading dashboard..." }</p> },
        Some(dashboard) => {
            let stats = dashboard.stats;
            html! {
                <>
                    if let Some(err) = dashboard.fetch_error.clone() {
                        <p class="form-error" role="alert" data-testid="dashboard-error">{ err }</p>
                    }
                    <div class="stat-grid">
                        <StatCard title="Today's recharges" value={stats.today_count.to_string()}
                            hint={Some(AttrValue::from(format!("₹{}", stats.today_amount)))} test_id="stat-today" />
                        <StatCard title="Total recharges" value={stats.total_count.to_string()}
                            hint={Some(AttrValue::from(format!("₹{}", stats.total_amount)))} test_id="stat-total" />
                        <StatCard title="Average recharge" value={format!("₹{}", stats.average_amount)} test_id="stat-average" />
                    </div>
                    <h2>{ "Transactions" }</h2>
                    if dashboard.transactions.is_empty() {
                        <p class="muted" data-testid="transactions-empty">{ "No transactions recorded." }</p>
                    } else {
                        <table class="transactions" data-testid="transactions">
                            <thead>
                                <tr>
                                    <th scope="col">{ "Operator" }</th>
                                    <th scope="col">{ "User" }</th>
                                    <th scope="col">{ "Amount" }</th>
                                    <th scope="col">{ "Phone" }</th>
                                    <th scope="col">{ "Status" }</th>
                                    <th scope="col">{ "Date" }</th>
                                </tr>
                            </thead>
                            <tbody>
                                { for dashboard.transactions.iter().map(transaction_row) }
                            </tbody>
                        </table>
                    }
                </>
            }
        }
    };

    html! {
        <section class="panel admin" aria-labelledby="admin-title">
            <h1 id="admin-title">{ "Admin dashboard" }</h1>
            { stats_and_transactions }
            <div class="admin-plans">
                <div class="admin-plans__header">
                    <h2>{ "Plans" }</h2>
                    <button type="button" onclick={open_add} disabled={p.busy} data-testid="add-plan">{ "Add plan" }</button>
                </div>
                <ul class="admin-plan-list">
                    { for p.plans.iter().map(|plan| {
                        let edit = {
                            let editor = editor.clone();
                            let plan = plan.clone();
                            Callback::from(move |_| editor.set(Editor::Editing(plan.clone())))
                        };
                        let delete = {
                            let cb = p.on_delete.clone();
                            let id = plan.id.clone();
                            Callback::from(move |_| cb.emit(id.clone()))
                        };
                        html! {
                            <li key={plan.id.clone()} class="admin-plan" data-testid="admin-plan">
                                <span>{ format!("₹{} · {} · {}", plan.price, plan.validity, plan.operator_or(&p.default_operator)) }</span>
                                <button type="button" onclick={edit} disabled={p.busy}
                                    data-testid={format!("edit-{}", plan.id)}>{ "Edit" }</button>
                                <button type="button" onclick={delete} disabled={p.busy}
                                    data-testid={format!("delete-{}", plan.id)}>{ "Delete" }</button>
                            </li>
                        }
                    }) }
                </ul>
            </div>
            { modal }
        </section>
    }
}
