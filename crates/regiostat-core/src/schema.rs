/// Field-name mapping for the raw regional statistics feed.
///
/// The upstream feed is a spreadsheet export with fixed Russian column
/// headers. Every header the normaliser depends on is listed here, with
/// legacy spellings after the current one in priority order.
pub mod feed {
    use serde_json::Value;

    use crate::category::{DeputyCategory, Metric};

    /// A canonical field and the raw keys that may carry it, in priority order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldSpec {
        pub canonical: &'static str,
        pub raw_keys: &'static [&'static str],
    }

    impl FieldSpec {
        /// First raw key present on the entry with a non-null value.
        pub fn lookup<'a>(&self, entry: &'a Value) -> Option<&'a Value> {
            self.raw_keys
                .iter()
                .filter_map(|key| entry.get(*key))
                .find(|v| !v.is_null())
        }
    }

    pub const REGION: FieldSpec = FieldSpec {
        canonical: "region",
        raw_keys: &["Наименование регионального отделения"],
    };

    pub const TOTAL_CITIZENS: FieldSpec = FieldSpec {
        canonical: "totalCitizens",
        raw_keys: &["Всего принято граждан", "Принято граждан"],
    };

    /// Key of the nested `topic → count` appeals object.
    pub const APPEALS: &str = "appeals";

    static ZS: [FieldSpec; 3] = [
        FieldSpec {
            canonical: "zs.total",
            raw_keys: &["Депутаты ЗС - всего"],
        },
        FieldSpec {
            canonical: "zs.interacting",
            raw_keys: &["Депутаты ЗС - взаимодействуют"],
        },
        FieldSpec {
            canonical: "zs.reception",
            raw_keys: &["Депутаты ЗС - ведут прием"],
        },
    ];

    static ACS: [FieldSpec; 3] = [
        FieldSpec {
            canonical: "acs.total",
            raw_keys: &["Депутаты АЦС - всего"],
        },
        FieldSpec {
            canonical: "acs.interacting",
            raw_keys: &["Депутаты АЦС - взаимодействуют"],
        },
        FieldSpec {
            canonical: "acs.reception",
            raw_keys: &["Депутаты АЦС - ведут прием"],
        },
    ];

    static OMSU: [FieldSpec; 3] = [
        FieldSpec {
            canonical: "omsu.total",
            raw_keys: &["Депутаты ОМСУ - всего"],
        },
        FieldSpec {
            canonical: "omsu.interacting",
            raw_keys: &["Депутаты ОМСУ - взаимодействуют"],
        },
        FieldSpec {
            canonical: "omsu.reception",
            raw_keys: &["Депутаты ОМСУ - ведут прием"],
        },
    ];

    /// Field for one `(category, metric)` head count.
    pub fn category_field(category: DeputyCategory, metric: Metric) -> &'static FieldSpec {
        let fields = match category {
            DeputyCategory::Zs => &ZS,
            DeputyCategory::Acs => &ACS,
            DeputyCategory::Omsu => &OMSU,
        };
        match metric {
            Metric::Total => &fields[0],
            Metric::Interacting => &fields[1],
            Metric::Reception => &fields[2],
        }
    }

    /// Flat appeal columns from the pre-`appeals` feed layout, mapped to the
    /// canonical topic names used by the nested object.
    pub const LEGACY_APPEAL_TOPICS: [(&str, &str); 11] = [
        ("Обращения тема - медицина", "Медицина и здравоохранение"),
        ("Обращения тема - ЖКХ", "Жилищно-коммунальное хозяйство"),
        ("Обращения тема - образование", "Образование"),
        ("Обращения тема - социальная защита", "Социальная защита"),
        ("Обращения тема - транспорт", "Транспорт и дороги"),
        ("Обращения тема - экология", "Экология"),
        ("Обращения тема - трудовые отношения", "Трудовые отношения"),
        ("Обращения тема - правопорядок", "Правопорядок и безопасность"),
        ("Обращения тема - СВО", "Поддержка участников СВО"),
        ("Обращения тема - земельные вопросы", "Земельные и имущественные вопросы"),
        ("Обращения тема - другое", "Прочее"),
    ];
}

/// Arrow schema definitions for exported aggregation results.
pub mod export {
    use arrow::datatypes::{DataType, Field, Schema};

    use crate::category::{DeputyCategory, Metric};

    /// Column name for one per-category breakdown value, e.g. `zs_reception`.
    pub fn breakdown_column(category: DeputyCategory, metric: Metric) -> String {
        format!("{}_{}", category.as_str(), metric.as_str())
    }

    /// Schema for per-region aggregated metrics: scalar totals followed by
    /// the flattened per-category breakdown.
    pub fn region_metrics_schema() -> Schema {
        let mut fields = vec![
            Field::new("region", DataType::Utf8, false),
            Field::new("total", DataType::Int64, false),
            Field::new("interacting", DataType::Int64, false),
            Field::new("reception", DataType::Int64, false),
            Field::new("engagement", DataType::Int64, false),
            Field::new("total_citizens", DataType::Int64, false),
        ];
        for category in DeputyCategory::ALL {
            for metric in Metric::ALL {
                fields.push(Field::new(
                    breakdown_column(category, metric),
                    DataType::Int64,
                    false,
                ));
            }
        }
        Schema::new(fields)
    }
}
