use oso::{Oso, PolarClass};

use crate::auth::{Catalog, User};
use crate::error::Error;

pub fn new() -> Result<Oso, Error> {
    let mut o = Oso::new();

    o.register_class(User::get_polar_class())?;
    o.register_class(Catalog::get_polar_class())?;

    o.load_str(include_str!("rules.polar"))?;

    Ok(o)
}

#[test]
fn visitor_role_test() {
    let authorizor = new().unwrap();

    let guest = User::new_guest();

    let result = authorizor.query_rule("has_role", (guest.clone(), "visitor", Catalog::places()));
    assert!(result.unwrap().next().unwrap().is_ok());

    let result = authorizor.query_rule("has_role", (guest.clone(), "admin", Catalog::places()));
    assert!(result.unwrap().next().is_none());
}

#[test]
fn guest_permissions_test() {
    let authorizor = new().unwrap();

    let guest = User::new_guest();

    for action in ["browse", "bookmark", "edit"] {
        let result = authorizor.is_allowed(guest.clone(), action, Catalog::places());
        assert_eq!(result.unwrap(), true, "{action}");
    }

    let result = authorizor.is_allowed(guest.clone(), "administer", Catalog::places());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn admin_permissions_test() {
    let authorizor = new().unwrap();

    let admin = User::new_admin();

    let result = authorizor.query_rule("has_role", (admin.clone(), "admin", Catalog::places()));
    assert!(result.unwrap().next().unwrap().is_ok());

    for action in ["browse", "bookmark", "edit", "administer"] {
        let result = authorizor.is_allowed(admin.clone(), action, Catalog::places());
        assert_eq!(result.unwrap(), true, "{action}");
    }

    let result = authorizor.is_allowed(admin.clone(), "demolish", Catalog::places());
    assert_eq!(result.unwrap(), false);
}
