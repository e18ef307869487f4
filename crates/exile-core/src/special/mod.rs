//! Special game systems
//!
//! Shops, the trapper, and NPC dialogue.

pub mod dialogue;
pub mod shk;

pub use dialogue::{
    DialogueAction, DialogueBook, DialogueNode, DialogueOption, DialogueSession, DialogueTree,
    current_node, initial_dialogues, start_dialogue,
};
pub use shk::{
    ShopId, ShopItem, ShopRegistry, handle_commerce, open_shop, purchase, trade_with_trapper,
};
