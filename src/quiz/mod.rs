//! Quiz engine: the catalog of screens, the visitor's answers and the
//! navigation rules that walk through them.
//!
//! A `QuizSession` owns everything for one visitor. The screen list is
//! derived from the role answer: two intake screens, then the chosen
//! role's screens.

pub mod assembler;
pub mod catalog;
mod content;
pub mod conversation;
pub mod filter;
pub mod navigation;
pub mod responses;
pub mod routes;
pub mod session;

pub use assembler::assemble;
pub use catalog::{Catalog, Question, QuizOption, Role, Screen, Visibility};
pub use conversation::{ChatSynchronizer, message_for};
pub use filter::{can_proceed, filter_visible};
pub use navigation::{NavEvent, NavigationState, Transition};
pub use responses::{QaLog, QaPair, ResponseStore};
pub use routes::{QuizRouteState, quiz_routes};
pub use session::{QuizSession, QuizStatus};
