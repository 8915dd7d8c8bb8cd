use crate::config::ServerType;
use crate::route::RouteType;
use std::fmt;

/// Route table validation error.
///
/// Every variant names the offending unit and the violated rule. Any of these
/// aborts the build: a table that violates them would break navigation for
/// every consumer of the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    /// A content unit has no usable name after trimming.
    EmptyName {
        /// Route type of the unit
        route_type: RouteType,
    },
    /// The name is, or starts with, the reserved `api` keyword.
    ReservedName {
        /// The offending name
        name: String,
    },
    /// The name contains a character that is never allowed in a route name.
    DisallowedCharacter {
        /// The offending name
        name: String,
        /// The first disallowed character found
        character: char,
    },
    /// The name has an empty, `.` or `..` segment.
    InvalidSegment {
        /// The offending name
        name: String,
        /// Which segment rule was violated
        reason: String,
    },
    /// The route's directory would shadow a file or directory the build writes.
    GeneratedPath {
        /// The offending name
        name: String,
        /// Generated entry at the output root
        path: String,
    },
    /// The name cannot be used as a directory on the selected host.
    UnsafeForHost {
        /// The offending name
        name: String,
        /// Host the site is built for
        server: ServerType,
        /// Which filesystem rule was violated
        reason: String,
    },
    /// Another unit already registered the same `(type, name)`.
    Duplicate {
        /// Route id shared by both units
        id: String,
    },
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteTableError::EmptyName { route_type } => {
                write!(f, "Route error: {route_type} route has an empty name")
            }
            RouteTableError::ReservedName { name } => write!(
                f,
                "Route error: name '{name}' is reserved. \
                'api' (alone or followed by a separator) addresses the api routes."
            ),
            RouteTableError::DisallowedCharacter { name, character } => write!(
                f,
                "Route error: name '{name}' contains disallowed character '{character}'. \
                Route names may not contain any of: # ~ & ^ ` ' \" \\"
            ),
            RouteTableError::InvalidSegment { name, reason } => {
                write!(f, "Route error: name '{name}' is not a valid route path: {reason}")
            }
            RouteTableError::GeneratedPath { name, path } => write!(
                f,
                "Route error: name '{name}' collides with the generated '{path}' output. \
                Rename the unit or nest it under another segment."
            ),
            RouteTableError::UnsafeForHost {
                name,
                server,
                reason,
            } => write!(
                f,
                "Route error: name '{name}' cannot be used as a directory on a '{server}' host: {reason}"
            ),
            RouteTableError::Duplicate { id } => write!(
                f,
                "Route error: duplicate route '{id}'. Two units resolve to the same name; \
                rename one of them."
            ),
        }
    }
}

impl std::error::Error for RouteTableError {}
