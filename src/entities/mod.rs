pub mod ammo;
pub mod character;
pub mod enemy;
pub mod weapon;
