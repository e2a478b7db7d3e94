/// UI widgets for ActivityPanel.

pub mod counter_card;
pub mod pagination_bar;
pub mod status_bar;
pub mod toolbar;
