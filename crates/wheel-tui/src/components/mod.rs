pub mod finished_overlay;
pub mod help_overlay;
pub mod name_list;
pub mod wheel_panel;
