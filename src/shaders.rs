//! Bundled GLSL ES 3.00 sources and the names the Rust side binds.

pub const QUAD_VERT: &str = include_str!("shaders/quad.vert");
pub const SNAKE_FRAG: &str = include_str!("shaders/snake.frag");
pub const FELIX_FRAG: &str = include_str!("shaders/felix.frag");

pub const A_POSITION: &str = "a_position";

pub const U_RESOLUTION: &str = "u_resolution";
pub const U_TIME: &str = "u_time";

pub const U_FIELD_SIZE: &str = "u_fieldSize";
pub const U_GAME_OVER: &str = "u_gameOver";
pub const U_TIME_SINCE_UPDATE: &str = "u_timeSinceUpdate";
pub const U_UPDATE_COUNT: &str = "u_updateCount";
pub const U_CELLS: &str = "u_cells";

pub const U_IMAGE_SIZE: &str = "u_imageSize";
pub const U_IMAGE: &str = "u_image";

pub const SNAKE_UNIFORMS: [&str; 7] = [
    U_RESOLUTION,
    U_TIME,
    U_FIELD_SIZE,
    U_GAME_OVER,
    U_TIME_SINCE_UPDATE,
    U_UPDATE_COUNT,
    U_CELLS,
];

pub const FELIX_UNIFORMS: [&str; 4] = [U_RESOLUTION, U_IMAGE_SIZE, U_TIME, U_IMAGE];
