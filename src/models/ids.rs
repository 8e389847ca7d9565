//! Record identifiers.
//!
//! Sessions refer to subjects and slots by id so that candidates stay
//! `Copy`-cheap to clone during the search.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Raw numeric value.
            #[inline]
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }

        impl From<u32> for $name {
            fn from(v: u32) -> Self {
                Self(v)
            }
        }
    };
}

id_type!(
    /// Time window / atomic slot identifier.
    SlotId,
    "slot"
);
id_type!(
    /// Practical pair identifier.
    PairId,
    "pair"
);
id_type!(
    /// Subject identifier.
    SubjectId,
    "subject"
);
id_type!(
    /// Department identifier.
    DepartmentId,
    "department"
);
id_type!(
    /// Classroom identifier.
    ClassroomId,
    "classroom"
);
id_type!(
    /// Faculty member identifier.
    FacultyId,
    "faculty"
);
id_type!(
    /// Timetable row identifier.
    EntryId,
    "entry"
);
