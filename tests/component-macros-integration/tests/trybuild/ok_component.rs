use component_macros::{component, inject, register};
use di_impl::{Component, DependencyResult, Injectable, KeyArgs, Singleton};
use std::sync::Arc;

#[component(name = "colors")]
#[derive(Debug)]
struct ColorRepository {
    palette: String,
}

impl ColorRepository {
    #[register("warm", 2)]
    fn warm(size: usize) -> Self {
        Self {
            palette: format!("warm-{}", size),
        }
    }
}

impl Injectable for ColorRepository {
    fn from_args(args: KeyArgs<'_>) -> DependencyResult<Self> {
        Ok(Self {
            palette: format!("{}-{}", args.str(0)?, args.int(1)?),
        })
    }
}

#[inject(ColorRepository, "warm", 2)]
struct PaletteController;

fn main() {
    let registered: Arc<ColorRepository> = ColorRepository::warm(3).unwrap();
    let injected = PaletteController::color_repository().unwrap();

    assert!(Arc::ptr_eq(&registered, &injected));
    assert!(Arc::ptr_eq(&injected, &ColorRepository::instance().unwrap()));
    assert_eq!(injected.palette, "warm-3");
    assert_eq!(injected.name(), "colors");
}
