pub mod details_screen;
pub mod home_screen;
pub mod recipient_screen;

use crate::state::{DetailsState, RecipientState};

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Home,
    ChooseRecipient(RecipientState),
    TransactionDetails(Box<DetailsState>),
}
