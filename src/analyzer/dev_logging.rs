

// TREE LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_tree")]
macro_rules! tree_log {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_tree"))]
macro_rules! tree_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// GRAPH LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_graph")]
macro_rules! graph_log {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_graph"))]
macro_rules! graph_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}

// ENVIRONMENT LOGGING MACROS
#[macro_export]
#[cfg(feature = "show_env")]
macro_rules! env_log {
    ($($arg:tt)*) => {
        eprintln!($($arg)*);
    };
}

#[macro_export]
#[cfg(not(feature = "show_env"))]
macro_rules! env_log {
    ($($arg:tt)*) => {
        // Nothing
    };
}
