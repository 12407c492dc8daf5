pub mod chat;
pub mod login;
pub mod nav;
pub mod ticket_form;
pub mod ticket_list;
pub mod toast;
