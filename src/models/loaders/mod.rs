pub mod prompt_loader;

pub use prompt_loader::{
    default_prompt_catalog, load_prompt_catalog, parse_prompt_catalog, resolve_prompt_catalog,
};
