pub mod synthetic_rgb;
