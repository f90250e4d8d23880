pub mod greenhouse_layout;

pub use greenhouse_layout::Entity as GreenhouseLayout;
