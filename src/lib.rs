pub mod math {
    pub mod approx_eq;
    pub mod color;
    pub mod point;
    pub mod tuple;
    pub mod vector;
}

pub mod render {
    pub mod canvas;
    pub mod hit;
    pub mod projection;
    pub mod renderer;
    pub mod texture;
}

pub mod scene;
