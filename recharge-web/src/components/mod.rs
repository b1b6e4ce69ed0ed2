pub mod category_tabs;
pub mod footer;
pub mod header;
pub mod history_card;
pub mod notice;
pub mod plan_card;
pub mod plan_form;
pub mod stat_card;
