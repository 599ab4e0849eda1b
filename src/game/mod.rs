pub mod chow_solver;
pub mod episode;
pub mod hand;
pub mod is_winning;
pub mod tile;
pub mod wall;
