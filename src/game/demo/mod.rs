// Demo module for the game. Provides submodules for running a terminal demo
// session: the tick loop, command parsing and rendering.
pub mod game_loop;
pub mod input;
pub mod render;
