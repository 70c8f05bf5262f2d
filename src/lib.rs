pub mod constants;
pub mod kepler;
pub mod keplight_errors;
pub mod light_travel;
pub mod orbital_elements;
pub mod system;
