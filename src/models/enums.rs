use serde::{Deserialize, Serialize};

/// Errors from parsing wire strings into model enums.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The wire string doubles as the serde representation.
///
/// The `lenient` form adds an `Unknown` variant for server values this
/// client does not know, so one unexpected row never fails a whole
/// collection. `Unknown` is not part of `ALL` and does not parse.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:tt),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        str_enum!(@common $name { $($variant => $s),+ });
    };
    (lenient $name:ident { $($variant:ident => $s:tt),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant,)+
            #[serde(rename = "UNKNOWN")]
            Unknown,
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(raw.parse().unwrap_or_else(|_| {
                    tracing::warn!(field = stringify!($name), value = %raw, "Unknown wire value");
                    Self::Unknown
                }))
            }
        }

        str_enum!(@common $name { $($variant => $s),+ } Unknown => "UNKNOWN");
    };
    (@common $name:ident { $($variant:ident => $s:tt),+ } $($fallback:ident => $fs:tt)?) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s,)+
                    $(Self::$fallback => $fs,)?
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(lenient Role {
    Admin => "ADMIN",
    Doctor => "DOCTOR",
    Patient => "PATIENT",
});

str_enum!(lenient Gender {
    Male => "MALE",
    Female => "FEMALE",
    Other => "OTHER",
});

str_enum!(lenient PatientStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    Transferred => "TRANSFERRED",
});

str_enum!(lenient AppointmentStatus {
    Scheduled => "SCHEDULED",
    Confirmed => "CONFIRMED",
    InProgress => "IN_PROGRESS",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
    NoShow => "NO_SHOW",
});

str_enum!(lenient MedicationCategory {
    Arv => "ARV",
    Antibiotic => "ANTIBIOTIC",
    Antifungal => "ANTIFUNGAL",
    Antiviral => "ANTIVIRAL",
    Supplement => "SUPPLEMENT",
    Other => "OTHER",
});

str_enum!(lenient TargetGroup {
    Adult => "ADULT",
    Pediatric => "PEDIATRIC",
    Pregnant => "PREGNANT",
    Elderly => "ELDERLY",
    RenalImpairment => "RENAL_IMPAIRMENT",
    HepaticImpairment => "HEPATIC_IMPAIRMENT",
});

str_enum!(lenient TreatmentLine {
    FirstLine => "FIRST_LINE",
    SecondLine => "SECOND_LINE",
    ThirdLine => "THIRD_LINE",
    Salvage => "SALVAGE",
});

str_enum!(lenient LabTestType {
    Cd4Count => "CD4_COUNT",
    ViralLoad => "VIRAL_LOAD",
    CompleteBloodCount => "COMPLETE_BLOOD_COUNT",
    LiverFunction => "LIVER_FUNCTION",
    KidneyFunction => "KIDNEY_FUNCTION",
    LipidProfile => "LIPID_PROFILE",
    Glucose => "GLUCOSE",
    Other => "OTHER",
});

impl LabTestType {
    /// Unit pre-filled by the lab form when this test type is picked.
    pub fn default_unit(self) -> &'static str {
        match self {
            LabTestType::Cd4Count => "cells/μL",
            LabTestType::ViralLoad => "copies/mL",
            LabTestType::LiverFunction => "U/L",
            LabTestType::KidneyFunction | LabTestType::LipidProfile | LabTestType::Glucose => {
                "mg/dL"
            }
            LabTestType::CompleteBloodCount | LabTestType::Other | LabTestType::Unknown => "",
        }
    }

    /// Reference range pre-filled by the lab form.
    pub fn default_reference_range(self) -> &'static str {
        match self {
            LabTestType::Cd4Count => "500-1600",
            LabTestType::ViralLoad => "<50",
            LabTestType::Glucose => "70-100",
            _ => "",
        }
    }
}

str_enum!(lenient ConsultationStatus {
    Pending => "PENDING",
    InProgress => "IN_PROGRESS",
    Active => "ACTIVE",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
});

impl ConsultationStatus {
    /// `IN_PROGRESS` and `ACTIVE` are both used by the backend for an
    /// ongoing consultation.
    pub fn is_ongoing(self) -> bool {
        matches!(self, ConsultationStatus::InProgress | ConsultationStatus::Active)
    }
}

str_enum!(lenient ConsultationType {
    General => "GENERAL",
    Chat => "CHAT",
    VideoCall => "VIDEO_CALL",
    InPerson => "IN_PERSON",
});

str_enum!(lenient ConsultationPriority {
    Low => "LOW",
    Normal => "NORMAL",
    Medium => "MEDIUM",
    High => "HIGH",
    Urgent => "URGENT",
});

str_enum!(lenient TreatmentPlanStatus {
    Active => "ACTIVE",
    Completed => "COMPLETED",
    Paused => "PAUSED",
    Cancelled => "CANCELLED",
});

str_enum!(lenient PlanItemType {
    Medication => "MEDICATION",
    Appointment => "APPOINTMENT",
    LabTest => "LAB_TEST",
    Lifestyle => "LIFESTYLE",
    Education => "EDUCATION",
    Other => "OTHER",
});

str_enum!(lenient SideEffectSeverity {
    Mild => "MILD",
    Moderate => "MODERATE",
    Severe => "SEVERE",
    Critical => "CRITICAL",
});

impl SideEffectSeverity {
    pub fn is_serious(self) -> bool {
        matches!(self, SideEffectSeverity::Severe | SideEffectSeverity::Critical)
    }
}

str_enum!(lenient NotificationType {
    AppointmentReminder => "APPOINTMENT_REMINDER",
    MedicationReminder => "MEDICATION_REMINDER",
    LabResult => "LAB_RESULT",
    System => "SYSTEM",
    TreatmentUpdate => "TREATMENT_UPDATE",
});

str_enum!(lenient EducationCategory {
    General => "GENERAL",
    Treatment => "TREATMENT",
    Prevention => "PREVENTION",
    Nutrition => "NUTRITION",
    MentalHealth => "MENTAL_HEALTH",
    Lifestyle => "LIFESTYLE",
    Faq => "FAQ",
    News => "NEWS",
});

str_enum!(ContactMethod {
    Phone => "PHONE",
    Email => "EMAIL",
});

str_enum!(UrgencyLevel {
    Low => "LOW",
    Normal => "NORMAL",
    High => "HIGH",
    Urgent => "URGENT",
});

str_enum!(BookingChannel {
    Chat => "CHAT",
    Video => "VIDEO",
    InPerson => "IN_PERSON",
});

str_enum!(ExportFormat {
    Pdf => "pdf",
    Excel => "excel",
});
