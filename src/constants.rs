//! Common constants used throughout credlify.

/// Leading character of a template file name that changes how it is copied.
/// One marker strips it, two markers capture the template instead of writing it.
pub const TEMPLATE_MARKER: char = '_';

/// Placeholder token syntax: `%%[name]%%`.
pub const PLACEHOLDER_PATTERN: &str = r"%%\[([A-Za-z0-9._-]+)\]%%";

/// Template evaluated into the project path configuration.
pub const CONFIG_TEMPLATE: &str = "config.js";

/// Ignore file name inside a template directory.
pub const IGNORE_FILE: &str = ".credlifyignore";

/// Package manifest looked up in the project root and its ancestors.
pub const MANIFEST_FILE: &str = "package.json";

/// Placeholder module directory created inside the JS source directory.
pub const MODULE_PLACEHOLDER_DIR: &str = "node_modules/app";

/// Captured template written into the module placeholder directory.
pub const CAPTURED_GITKEEP: &str = ".gitkeep";

/// Captured template written into the destination root.
pub const CAPTURED_INDEX: &str = "index.html";

/// Empty entry points created in the source directories.
pub const JS_ENTRY: &str = "index.js";
pub const SASS_ENTRY: &str = "index.scss";

/// Manifest module type required by the generated build files.
pub const MANIFEST_MODULE_TYPE: &str = "module";

/// Import alias the generated build files rely on.
pub const MANIFEST_IMPORT_ALIAS: (&str, &str) = ("#root/*", "./*.js");

/// Regular dependencies installed into the project.
pub const DEPENDENCIES: &[&str] = &["@babel/runtime"];

/// Development dependencies installed into the project.
pub const DEV_DEPENDENCIES: &[&str] = &[
    "@babel/core",
    "@babel/plugin-proposal-class-properties",
    "@babel/plugin-proposal-export-default-from",
    "@babel/plugin-proposal-object-rest-spread",
    "@babel/plugin-syntax-dynamic-import",
    "@babel/plugin-transform-async-to-generator",
    "@babel/plugin-transform-runtime",
    "@babel/preset-env",
    "@babel/register",
    "babel-loader",
    "babel-plugin-root-import",
    "del",
    "gulp",
    "gulp-clean-css",
    "gulp-dart-sass",
    "gulp-plumber",
    "gulp-sourcemaps",
    "live-server",
    "minimist",
    "minimist-options",
    "terser-webpack-plugin",
    "webpack",
    "webpack-stream",
];
