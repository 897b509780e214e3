pub mod carousel;
pub mod pitch;
pub mod player_card;
pub mod roster;
