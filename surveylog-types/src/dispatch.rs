//! Reading and writing typed answer values.
//!
//! Each [`QuestionType`] stores its value in a fixed set of answer fields:
//!
//! | Type | Fields | Value |
//! |---|---|---|
//! | INT, FIXEDPOINT, DURATION24 | `value` | `Int` |
//! | MULTICHOICE, MULTISELECT | `text` | `List` of `Text` |
//! | LATLON | `lat`, `lon` | `List` of two `Int` |
//! | DATETIME, DAYTIME | `time_begin` | `Int` |
//! | TIMERANGE | `time_begin`, `time_end` | `List` of two `Int` |
//! | text types | `text` | `Text` |
//! | FIXEDPOINT_SEQUENCE | `text` | ascending `List` of `Float` |
//! | DAYTIME_SEQUENCE, DATETIME_SEQUENCE | `text` | ascending `List` of `Int` |
//!
//! UPLOAD answers cannot be read or written.

use crate::{Answer, QuestionType, Value, ValueError};

/// Separator of list items stored in `text`.
pub const LIST_SEPARATOR: char = ',';

/// Resolve the question type of an answer.
///
/// The answer's own `type` field wins whenever it is present, even when it is
/// blank. Only public-scope answers, which carry no type, use `question_type`
/// from the caller.
pub fn resolve_type(answer: &Answer, question_type: Option<&str>) -> Result<QuestionType, ValueError> {
    answer
        .question_type
        .as_deref()
        .or(question_type)
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| ValueError::MissingType {
            uid: answer.uid.clone(),
        })?
        .parse()
}

/// Build a full-scope answer for `uid` and store `value` in it.
///
/// `stored` defaults to the current UNIX time.
///
/// ```
/// use surveylog_types::{set_answer, Value};
///
/// let answer = set_answer("q2", "LATLON", &Value::from([10, 20]), Some(1_700_000_000)).unwrap();
/// assert_eq!((answer.lat, answer.lon, answer.unit.as_str()), (10, 20, "degrees"));
/// assert_eq!(answer.get_value(None).unwrap(), Value::from([10, 20]));
/// ```
pub fn set_answer(
    uid: impl Into<String>,
    question_type: &str,
    value: &Value,
    stored: Option<i64>,
) -> Result<Answer, ValueError> {
    let stored = stored.unwrap_or_else(|| chrono::Utc::now().timestamp());
    Answer::new(uid, question_type)
        .with_stored(stored)
        .set_value(value, None)
}

impl Answer {
    /// Read the typed value of this answer.
    ///
    /// `question_type` is only consulted when the answer has no type of its own.
    pub fn get_value(&self, question_type: Option<&str>) -> Result<Value, ValueError> {
        let qtype = resolve_type(self, question_type)?;
        let tag = qtype.as_str();

        let value = match qtype {
            QuestionType::Int | QuestionType::FixedPoint | QuestionType::Duration24 => {
                Value::Int(self.value)
            }
            QuestionType::MultiChoice | QuestionType::MultiSelect => {
                Value::List(split_list(&self.text).map(Value::from).collect())
            }
            QuestionType::LatLon => Value::from([self.lat, self.lon]),
            QuestionType::DateTime | QuestionType::DayTime => Value::Int(self.time_begin),
            QuestionType::TimeRange => Value::from([self.time_begin, self.time_end]),
            QuestionType::Upload => return Err(ValueError::Unsupported(tag.to_string())),
            QuestionType::Text
            | QuestionType::Checkbox
            | QuestionType::Hidden
            | QuestionType::TextArea
            | QuestionType::Email
            | QuestionType::Password
            | QuestionType::SingleChoice
            | QuestionType::SingleSelect
            | QuestionType::DialogDataCrawler => Value::Text(self.text.clone()),
            QuestionType::FixedPointSequence => Value::List(
                split_list(&self.text)
                    .map(|item| parse_float(tag, item).map(Value::Float))
                    .collect::<Result<_, _>>()?,
            ),
            QuestionType::DayTimeSequence | QuestionType::DateTimeSequence => Value::List(
                split_list(&self.text)
                    .map(|item| parse_int(tag, item).map(Value::Int))
                    .collect::<Result<_, _>>()?,
            ),
        };

        Ok(value)
    }

    /// Validate `value` and return a copy of this answer holding it.
    ///
    /// `question_type` is only consulted when the answer has no type of its own.
    /// The answer is left unchanged on error.
    pub fn set_value(&self, value: &Value, question_type: Option<&str>) -> Result<Answer, ValueError> {
        let qtype = resolve_type(self, question_type)?;
        let tag = qtype.as_str();
        let unit = qtype
            .unit()
            .map_or_else(|| self.unit.clone(), str::to_string);

        let answer = match qtype {
            QuestionType::Int | QuestionType::FixedPoint | QuestionType::Duration24 => Answer {
                value: to_int(tag, value)?,
                unit,
                ..self.clone()
            },
            QuestionType::MultiChoice | QuestionType::MultiSelect => {
                let items = expect_list(tag, value)?
                    .iter()
                    .map(|item| to_text(tag, item))
                    .collect::<Result<Vec<_>, _>>()?;
                Answer {
                    text: join_list(items),
                    unit,
                    ..self.clone()
                }
            }
            QuestionType::LatLon => {
                let [lat, lon] = expect_pair(tag, value)?;
                Answer {
                    lat,
                    lon,
                    unit,
                    ..self.clone()
                }
            }
            QuestionType::DateTime | QuestionType::DayTime => Answer {
                time_begin: to_int(tag, value)?,
                unit,
                ..self.clone()
            },
            QuestionType::TimeRange => {
                let [time_begin, time_end] = expect_pair(tag, value)?;
                Answer {
                    time_begin,
                    time_end,
                    unit,
                    ..self.clone()
                }
            }
            QuestionType::Upload => return Err(ValueError::Unsupported(tag.to_string())),
            QuestionType::Text
            | QuestionType::Checkbox
            | QuestionType::Hidden
            | QuestionType::TextArea
            | QuestionType::Email
            | QuestionType::Password
            | QuestionType::SingleChoice
            | QuestionType::SingleSelect
            | QuestionType::DialogDataCrawler => Answer {
                text: to_text(tag, value)?,
                unit,
                ..self.clone()
            },
            QuestionType::FixedPointSequence => {
                let items = expect_list(tag, value)?
                    .iter()
                    .map(|item| to_float(tag, item))
                    .collect::<Result<Vec<_>, _>>()?;
                check_ascending(tag, &items)?;
                Answer {
                    text: join_list(items),
                    unit,
                    ..self.clone()
                }
            }
            QuestionType::DayTimeSequence | QuestionType::DateTimeSequence => {
                let items = expect_list(tag, value)?
                    .iter()
                    .map(|item| to_int(tag, item))
                    .collect::<Result<Vec<_>, _>>()?;
                check_ascending(tag, &items)?;
                Answer {
                    text: join_list(items),
                    unit,
                    ..self.clone()
                }
            }
        };

        Ok(answer)
    }
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    // An empty field is an empty list, so a list holding one empty item
    // reads back as an empty list.
    text.split(LIST_SEPARATOR).filter(move |_| !text.is_empty())
}

fn join_list<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(LIST_SEPARATOR.to_string().as_str())
}

fn expect_list<'a>(tag: &str, value: &'a Value) -> Result<&'a [Value], ValueError> {
    value.as_list().ok_or_else(|| ValueError::Shape {
        tag: tag.to_string(),
        expected: "a list",
    })
}

fn expect_pair(tag: &str, value: &Value) -> Result<[i64; 2], ValueError> {
    match value.as_list() {
        Some([first, second]) => Ok([to_int(tag, first)?, to_int(tag, second)?]),
        _ => Err(ValueError::Shape {
            tag: tag.to_string(),
            expected: "a list with exactly 2 elements",
        }),
    }
}

fn to_int(tag: &str, value: &Value) -> Result<i64, ValueError> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Float(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Ok(f.trunc() as i64),
        Value::Float(f) => Err(parse_error(tag, "an integer", &f.to_string())),
        Value::Text(s) => parse_int(tag, s),
        Value::List(_) => Err(ValueError::Shape {
            tag: tag.to_string(),
            expected: "a single integer",
        }),
    }
}

fn to_float(tag: &str, value: &Value) -> Result<f64, ValueError> {
    match value {
        Value::Int(i) => Ok(*i as f64),
        Value::Float(f) if f.is_finite() => Ok(*f),
        Value::Text(s) => parse_float(tag, s),
        Value::Float(_) | Value::Bool(_) => Err(parse_error(tag, "a number", &value.to_string())),
        Value::List(_) => Err(ValueError::Shape {
            tag: tag.to_string(),
            expected: "a list of numbers",
        }),
    }
}

fn to_text(tag: &str, value: &Value) -> Result<String, ValueError> {
    match value {
        // Keep the fraction of whole floats, `1.0` rather than `1`.
        Value::Float(f) => Ok(format!("{f:?}")),
        Value::List(_) => Err(ValueError::Shape {
            tag: tag.to_string(),
            expected: "a single value",
        }),
        _ => Ok(value.to_string()),
    }
}

fn parse_int(tag: &str, text: &str) -> Result<i64, ValueError> {
    text.trim()
        .parse()
        .map_err(|_| parse_error(tag, "an integer", text))
}

fn parse_float(tag: &str, text: &str) -> Result<f64, ValueError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| parse_error(tag, "a number", text))
}

fn parse_error(tag: &str, expected: &'static str, text: &str) -> ValueError {
    ValueError::Parse {
        tag: tag.to_string(),
        expected,
        text: text.to_string(),
    }
}

fn check_ascending<T: PartialOrd>(tag: &str, items: &[T]) -> Result<(), ValueError> {
    match items.windows(2).position(|pair| pair[1] < pair[0]) {
        Some(i) => Err(ValueError::NotAscending {
            tag: tag.to_string(),
            index: i + 1,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scope;

    const TS: Option<i64> = Some(1_700_000_000);

    fn set(tag: &str, value: impl Into<Value>) -> Result<Answer, ValueError> {
        set_answer("q", tag, &value.into(), TS)
    }

    #[test]
    fn int_types() {
        for tag in ["INT", "FIXEDPOINT", "DURATION24"] {
            let answer = set(tag, 42).unwrap();
            assert_eq!(answer.value, 42);
            assert_eq!(answer.get_value(None), Ok(Value::Int(42)));
        }
        assert_eq!(set("INT", " 17 ").unwrap().value, 17);
        assert_eq!(set("DURATION24", 60).unwrap().unit, "seconds");
        assert_eq!(set("INT", 60).unwrap().unit, "");
    }

    #[test]
    fn int_rejects_garbage() {
        let err = set("INT", "forty-two").unwrap_err();
        assert!(matches!(err, ValueError::Parse { .. }));
        assert!(err.is_validation_error());
        assert!(matches!(
            set("INT", [1, 2]),
            Err(ValueError::Shape { .. })
        ));
    }

    #[test]
    fn multi_types() {
        for tag in ["MULTICHOICE", "MULTISELECT"] {
            let answer = set(tag, vec!["red", "blue"]).unwrap();
            assert_eq!(answer.text, "red,blue");
            assert_eq!(answer.get_value(None), Ok(Value::from(vec!["red", "blue"])));
        }
        assert!(matches!(
            set("MULTISELECT", "red"),
            Err(ValueError::Shape { .. })
        ));
    }

    #[test]
    fn empty_multi_select_round_trips() {
        let answer = set("MULTISELECT", Vec::<Value>::new()).unwrap();
        assert_eq!(answer.text, "");
        assert_eq!(answer.get_value(None), Ok(Value::List(Vec::new())));
    }

    #[test]
    fn single_empty_choice_reads_as_empty_list() {
        let answer = set("MULTISELECT", vec![""]).unwrap();
        assert_eq!(answer.text, "");
        assert_eq!(answer.get_value(None), Ok(Value::List(Vec::new())));
    }

    #[test]
    fn latlon() {
        let answer = set("LATLON", [10, 20]).unwrap();
        assert_eq!((answer.lat, answer.lon), (10, 20));
        assert_eq!(answer.unit, "degrees");
        assert_eq!(answer.get_value(None), Ok(Value::from([10, 20])));

        assert!(matches!(set("LATLON", [1, 2, 3]), Err(ValueError::Shape { .. })));
        assert!(matches!(set("LATLON", 5), Err(ValueError::Shape { .. })));
    }

    #[test]
    fn datetime_and_daytime() {
        for tag in ["DATETIME", "DAYTIME"] {
            let answer = set(tag, 3600).unwrap();
            assert_eq!(answer.time_begin, 3600);
            assert_eq!(answer.unit, "seconds");
            assert_eq!(answer.get_value(None), Ok(Value::Int(3600)));
        }
    }

    #[test]
    fn timerange() {
        let answer = set("TIMERANGE", [3600, 7200]).unwrap();
        assert_eq!((answer.time_begin, answer.time_end), (3600, 7200));
        assert_eq!(answer.unit, "seconds");
        assert_eq!(answer.get_value(None), Ok(Value::from([3600, 7200])));
    }

    #[test]
    fn timerange_rejects_non_numbers() {
        let value = Value::List(vec![Value::from("abc"), Value::from(5)]);
        let err = set_answer("q", "TIMERANGE", &value, TS).unwrap_err();
        assert_eq!(
            err,
            ValueError::Parse {
                tag: "TIMERANGE".to_string(),
                expected: "an integer",
                text: "abc".to_string()
            }
        );
        assert!(matches!(set("TIMERANGE", [1]), Err(ValueError::Shape { .. })));
    }

    #[test]
    fn text_types() {
        for tag in [
            "TEXT",
            "CHECKBOX",
            "HIDDEN",
            "TEXTAREA",
            "EMAIL",
            "PASSWORD",
            "SINGLECHOICE",
            "SINGLESELECT",
            "DIALOG_DATA_CRAWLER",
        ] {
            let answer = set(tag, "hello: world").unwrap();
            assert_eq!(answer.text, "hello: world");
            assert_eq!(answer.get_value(None), Ok(Value::from("hello: world")));
        }
        assert_eq!(set("TEXT", 12).unwrap().text, "12");
        assert_eq!(set("CHECKBOX", true).unwrap().text, "true");
    }

    #[test]
    fn text_keeps_float_fraction() {
        assert_eq!(set("TEXT", 1.0).unwrap().text, "1.0");
        assert_eq!(set("TEXT", 2.5).unwrap().text, "2.5");
        assert_eq!(set("MULTICHOICE", vec![1.0, 3.0]).unwrap().text, "1.0,3.0");
    }

    #[test]
    fn fixedpoint_sequence() {
        let answer = set("FIXEDPOINT_SEQUENCE", vec![1.5, 2.0, 2.0, 10.25]).unwrap();
        assert_eq!(answer.text, "1.5,2,2,10.25");
        assert_eq!(answer.value, 0);
        assert_eq!(
            answer.get_value(None),
            Ok(Value::from(vec![1.5, 2.0, 2.0, 10.25]))
        );
    }

    #[test]
    fn int_sequences() {
        for tag in ["DAYTIME_SEQUENCE", "DATETIME_SEQUENCE"] {
            let answer = set(tag, [1, 3, 3, 8]).unwrap();
            assert_eq!(answer.text, "1,3,3,8");
            assert_eq!(answer.unit, "seconds");
            assert_eq!(answer.get_value(None), Ok(Value::from([1, 3, 3, 8])));
        }
    }

    #[test]
    fn sequences_must_ascend() {
        for tag in ["FIXEDPOINT_SEQUENCE", "DAYTIME_SEQUENCE", "DATETIME_SEQUENCE"] {
            let err = set(tag, [5, 3, 8]).unwrap_err();
            assert_eq!(
                err,
                ValueError::NotAscending {
                    tag: tag.to_string(),
                    index: 1
                }
            );
            assert!(set(tag, [1, 3, 3, 8]).is_ok());
        }
    }

    #[test]
    fn sequences_compare_numerically() {
        // "10" sorts before "9" as text.
        assert!(set("DAYTIME_SEQUENCE", vec!["9", "10"]).is_ok());
        assert!(set("FIXEDPOINT_SEQUENCE", vec!["9.5", "10"]).is_ok());
    }

    #[test]
    fn sequence_get_rejects_garbage() {
        let answer = Answer {
            text: "1,x".to_string(),
            ..Answer::new("q", "DAYTIME_SEQUENCE")
        };
        assert!(matches!(
            answer.get_value(None),
            Err(ValueError::Parse { .. })
        ));
    }

    #[test]
    fn upload_is_unsupported() {
        let err = set("UPLOAD", "file.png").unwrap_err();
        assert_eq!(err, ValueError::Unsupported("UPLOAD".to_string()));
        assert!(err.is_type_error());
        assert!(Answer::new("q", "UPLOAD").get_value(None).is_err());
    }

    #[test]
    fn unknown_type() {
        assert_eq!(
            set("SLIDER", 1).unwrap_err(),
            ValueError::UnknownType("SLIDER".to_string())
        );
    }

    #[test]
    fn missing_type() {
        let public = Answer::new("q9", "INT").into_scope(Scope::Public);
        assert_eq!(
            public.get_value(None),
            Err(ValueError::MissingType {
                uid: "q9".to_string()
            })
        );
        assert_eq!(public.get_value(Some("INT")), Ok(Value::Int(0)));
    }

    #[test]
    fn own_type_wins() {
        let answer = set("TEXT", "hi").unwrap();
        assert_eq!(answer.get_value(Some("INT")), Ok(Value::from("hi")));
    }

    #[test]
    fn blank_own_type_is_missing() {
        let answer = Answer::new("q", "");
        let missing: Result<Value, ValueError> = Err(ValueError::MissingType {
            uid: "q".to_string(),
        });
        assert_eq!(answer.get_value(Some("INT")), missing);
        assert_eq!(answer.get_value(None), missing);
        assert!(matches!(
            answer.set_value(&Value::from(1), Some("INT")),
            Err(ValueError::MissingType { .. })
        ));
    }

    #[test]
    fn blank_caller_type_is_missing() {
        let public = Answer::new("q", "INT").into_scope(Scope::Public);
        assert!(matches!(
            public.get_value(Some("")),
            Err(ValueError::MissingType { .. })
        ));
    }

    #[test]
    fn failed_set_leaves_answer_alone() {
        let answer = set("LATLON", [10, 20]).unwrap();
        assert!(answer.set_value(&Value::from([1]), None).is_err());
        assert_eq!((answer.lat, answer.lon), (10, 20));
    }

    #[test]
    fn set_answer_defaults_stored_to_now() {
        let before = chrono::Utc::now().timestamp();
        let answer = set_answer("q", "INT", &Value::from(1), None).unwrap();
        let stored = answer.stored.unwrap();
        assert!(stored >= before);
        assert!(stored <= chrono::Utc::now().timestamp());
        assert_eq!(answer.question_type.as_deref(), Some("INT"));
        assert_eq!(answer.flags, Some(0));
    }

    #[test]
    fn ascending_check() {
        assert_eq!(check_ascending::<i64>("T", &[]), Ok(()));
        assert_eq!(check_ascending("T", &[1]), Ok(()));
        assert!(check_ascending("T", &[1.0, 0.5]).is_err());
    }
}
