pub mod combat;
pub mod crosshair;
pub mod enemy;
pub mod helpers;
pub mod items;
pub mod weapons;
