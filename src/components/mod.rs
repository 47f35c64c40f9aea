pub mod operation_form;
pub mod wallet;
