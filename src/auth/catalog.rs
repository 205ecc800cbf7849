use oso::PolarClass;
use serde::{Deserialize, Serialize};

/// The place directory as an authorization resource.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    name: String,
}

impl Catalog {
    pub fn places() -> Self {
        Self {
            name: "places".into(),
        }
    }
}

impl PolarClass for Catalog {
    fn get_polar_class_builder() -> oso::ClassBuilder<Catalog> {
        oso::Class::builder()
            .name("Catalog")
            .add_attribute_getter("name", |recv: &Catalog| recv.name.clone())
            .add_class_method("places", Catalog::places)
    }

    fn get_polar_class() -> oso::Class {
        let builder = Catalog::get_polar_class_builder();
        builder.build()
    }
}
