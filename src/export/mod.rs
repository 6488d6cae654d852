pub mod jbeam;

pub use jbeam::{
    ExportError, FrameTuning, export_frame, write_info, write_jbeam, write_materials,
};
