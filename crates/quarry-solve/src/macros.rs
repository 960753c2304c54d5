// Copyright (c) Contributors to the Quarry project.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/quarry-pm/quarry

/// Makes a package spec from a json-style literal.
///
/// spec!({"pkg": "mypkg", "version": "1.0.0"});
#[macro_export]
macro_rules! spec {
    ($spec:tt) => {{
        let value = $crate::serde_json::json!($spec);
        let spec: $crate::Spec =
            $crate::serde_json::from_value(value).expect("invalid spec json");
        spec
    }};
}

/// Creates a catalog containing the provided package specs.
///
/// make_catalog!([
///     {"pkg": "mypkg", "version": "1.0.0"},
///     {"pkg": "mypkg", "version": "2.0.0"},
/// ]);
#[macro_export(local_inner_macros)]
macro_rules! make_catalog {
    ( [ $( $spec:tt ),* $(,)? ] ) => {{
        let mut catalog = $crate::Catalog::new();
        $(
            catalog.add(spec!($spec));
        )*
        catalog
    }};
}

/// Creates a request from a literal `name` or `name/version` form.
#[macro_export]
macro_rules! request {
    ($req:literal) => {
        $crate::Request::parse($req, $crate::RequestedBy::InternalTest)
            .expect("invalid request literal")
    };
}
