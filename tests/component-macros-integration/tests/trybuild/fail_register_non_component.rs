use component_macros::register;

#[derive(Debug)]
struct PlainStruct;

impl PlainStruct {
    #[register]
    fn new() -> Self {
        Self
    }
}

fn main() {
    let _ = PlainStruct::new();
}
