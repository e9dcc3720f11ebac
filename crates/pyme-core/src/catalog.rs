//! Static lookup tables: regions, units of measure, and departments.
//!
//! Each table is a closed enum. Entries parse from their display text
//! (case-insensitive, surrounding whitespace ignored) and serialize back to
//! it, so they travel over the wire exactly as the forms show them.
//!
//! ```rust
//! use pyme_core::catalog::{Region, Unit};
//!
//! let region: Region = "región metropolitana".parse().unwrap();
//! assert_eq!(region, Region::Metropolitana);
//! assert_eq!(region.as_str(), "Región Metropolitana");
//!
//! assert_eq!(Unit::default(), Unit::Und);
//! assert_eq!(Unit::M2.label(), "Metro Cuadrado");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

macro_rules! lookup_table {
    (
        $(#[$meta:meta])*
        $name:ident as $table:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every entry, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display text, also used on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|entry| entry.as_str().to_lowercase() == wanted)
                    .ok_or_else(|| Error::unknown_entry($table, s))
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for &'static str {
            fn from(entry: $name) -> Self {
                entry.as_str()
            }
        }
    };
}

lookup_table! {
    /// The sixteen regions of Chile, north to south.
    Region as "region" {
        /// XV
        AricaYParinacota => "Región de Arica y Parinacota",
        /// I
        Tarapaca => "Región de Tarapacá",
        /// II
        Antofagasta => "Región de Antofagasta",
        /// III
        Atacama => "Región de Atacama",
        /// IV
        Coquimbo => "Región de Coquimbo",
        /// V
        Valparaiso => "Región de Valparaíso",
        /// RM
        Metropolitana => "Región Metropolitana",
        /// VI
        OHiggins => "Región del Libertador Bernardo O'Higgins",
        /// VII
        Maule => "Región del Maule",
        /// XVI
        Nuble => "Región de Ñuble",
        /// VIII
        Biobio => "Región del Biobío",
        /// IX
        Araucania => "Región de La Araucanía",
        /// XIV
        LosRios => "Región de Los Ríos",
        /// X
        LosLagos => "Región de Los Lagos",
        /// XI
        Aysen => "Región de Aysén",
        /// XII
        Magallanes => "Región de Magallanes",
    }
}

lookup_table! {
    /// Units of measure for products, keyed by their short code.
    #[derive(Default)]
    Unit as "unit" {
        /// Unidad
        #[default]
        Und => "UND",
        /// Kilogramo
        Kg => "KG",
        /// Litro
        Lt => "LT",
        /// Metro
        Mt => "MT",
        /// Metro cuadrado
        M2 => "M2",
        /// Metro cúbico
        M3 => "M3",
        /// Horas
        Hrs => "HRS",
        /// Mes
        Mes => "MES",
        /// Par
        Par => "PAR",
        /// Set
        Set => "SET",
        /// Licencia
        Lic => "LIC",
    }
}

impl Unit {
    /// Human-readable name of the unit.
    pub fn label(&self) -> &'static str {
        match self {
            Unit::Und => "Unidad",
            Unit::Kg => "Kilogramo",
            Unit::Lt => "Litro",
            Unit::Mt => "Metro",
            Unit::M2 => "Metro Cuadrado",
            Unit::M3 => "Metro Cúbico",
            Unit::Hrs => "Horas",
            Unit::Mes => "Mes",
            Unit::Par => "Par",
            Unit::Set => "Set",
            Unit::Lic => "Licencia",
        }
    }
}

lookup_table! {
    /// Company areas an employee can belong to.
    Department as "department" {
        /// Sales
        Ventas => "Ventas",
        /// Finance
        Finanzas => "Finanzas",
        /// IT
        Tecnologia => "Tecnología",
        /// HR
        RecursosHumanos => "Recursos Humanos",
        /// Operations
        Operaciones => "Operaciones",
        /// Marketing
        Marketing => "Marketing",
    }
}
