//! Calendar event records exchanged with Microsoft Graph.
//!
//! [`Event`] is the payload for creating an event, [`EventPatch`] the
//! payload for a partial update, and [`OutlookEvent`] the representation
//! Graph returns for a created event.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyContentType {
    Text,
    Html,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttendeeType {
    Required,
    Optional,
    Resource,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Importance {
    Low,
    Normal,
    High,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OnlineMeetingProvider {
    TeamsForBusiness,
    SkypeForBusiness,
    SkypeForConsumer,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventSensitivity {
    Normal,
    Personal,
    Private,
    Confidential,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventShowAs {
    Free,
    Tentative,
    Busy,
    Oof,
    WorkingElsewhere,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    SingleInstance,
    Occurrence,
    Exception,
    SeriesMaster,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResponseType {
    None,
    Organizer,
    TentativelyAccepted,
    Accepted,
    Declined,
    NotResponded,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub content_type: BodyContentType,
    pub content: String,
}

/// A wall-clock time paired with a Windows or IANA time zone name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub email_address: EmailAddress,
    #[serde(rename = "type")]
    pub attendee_type: AttendeeType,
}

/// An event to create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub subject: String,
    pub body: ItemBody,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    pub location: Location,
    pub attendees: Vec<Attendee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online_meeting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_meeting_provider: Option<OnlineMeetingProvider>,
    /// Client-supplied id Graph uses to detect duplicate creates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
}

/// Any subset of [`Event`] fields. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTimeTimeZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTimeTimeZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Attendee>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_online_meeting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_meeting_provider: Option<OnlineMeetingProvider>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
}

impl From<Event> for EventPatch {
    fn from(event: Event) -> Self {
        Self {
            subject: Some(event.subject),
            body: Some(event.body),
            start: Some(event.start),
            end: Some(event.end),
            location: Some(event.location),
            attendees: Some(event.attendees),
            is_online_meeting: event.is_online_meeting,
            online_meeting_provider: event.online_meeting_provider,
            transaction_id: event.transaction_id,
            categories: event.categories,
            importance: event.importance,
            is_all_day: event.is_all_day,
        }
    }
}

// ===== Server representation =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEmailAddress {
    #[serde(default)]
    pub name: Option<String>,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    pub response: ResponseType,
    #[serde(default)]
    pub time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteAttendee {
    #[serde(rename = "type")]
    pub attendee_type: AttendeeType,
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    pub email_address: RemoteEmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organizer {
    pub email_address: RemoteEmailAddress,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLocation {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub unique_id_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineMeetingInfo {
    #[serde(default)]
    pub join_url: Option<String>,
    #[serde(default)]
    pub conference_id: Option<String>,
    #[serde(default)]
    pub toll_number: Option<String>,
}

/// Typed view of an event returned by Graph.
///
/// Every field tolerates absence or `null`, and enums fall back to
/// `Unknown`, so any event object decodes. Properties not modelled here are
/// kept in `additional_properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub created_date_time: Option<String>,
    #[serde(default)]
    pub last_modified_date_time: Option<String>,
    #[serde(default)]
    pub change_key: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub original_start_time_zone: Option<String>,
    #[serde(default)]
    pub original_end_time_zone: Option<String>,
    #[serde(default, rename = "iCalUId")]
    pub ical_uid: Option<String>,
    #[serde(default)]
    pub reminder_minutes_before_start: Option<i64>,
    #[serde(default)]
    pub is_reminder_on: Option<bool>,
    #[serde(default)]
    pub has_attachments: Option<bool>,
    #[serde(default)]
    pub hide_attendees: Option<bool>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body_preview: Option<String>,
    #[serde(default)]
    pub importance: Option<Importance>,
    #[serde(default)]
    pub sensitivity: Option<EventSensitivity>,
    #[serde(default)]
    pub is_all_day: Option<bool>,
    #[serde(default)]
    pub is_cancelled: Option<bool>,
    #[serde(default)]
    pub is_draft: Option<bool>,
    #[serde(default)]
    pub is_organizer: Option<bool>,
    #[serde(default)]
    pub response_requested: Option<bool>,
    #[serde(default)]
    pub series_master_id: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub show_as: Option<EventShowAs>,
    #[serde(default, rename = "type")]
    pub event_type: Option<EventType>,
    #[serde(default)]
    pub web_link: Option<String>,
    #[serde(default)]
    pub online_meeting_url: Option<String>,
    #[serde(default)]
    pub is_online_meeting: Option<bool>,
    #[serde(default)]
    pub online_meeting_provider: Option<OnlineMeetingProvider>,
    #[serde(default)]
    pub online_meeting: Option<OnlineMeetingInfo>,
    #[serde(default)]
    pub recurrence: Option<Value>,
    #[serde(default)]
    pub response_status: Option<ResponseStatus>,
    #[serde(default)]
    pub body: Option<ItemBody>,
    #[serde(default)]
    pub start: Option<DateTimeTimeZone>,
    #[serde(default)]
    pub end: Option<DateTimeTimeZone>,
    #[serde(default)]
    pub location: Option<RemoteLocation>,
    #[serde(default)]
    pub locations: Option<Vec<RemoteLocation>>,
    #[serde(default)]
    pub attendees: Option<Vec<RemoteAttendee>>,
    #[serde(default)]
    pub organizer: Option<Organizer>,
    #[serde(flatten)]
    pub additional_properties: Map<String, Value>,
}

/// The response Graph returned for a created event, exactly as received.
///
/// Serializing an `OutlookEvent` yields the original JSON. Use
/// [`OutlookEvent::remote_event`] for a typed view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutlookEvent(Value);

impl OutlookEvent {
    /// The event id, when the response carries one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// A top-level property of the response.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The response as received.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the event, returning the response as received.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Decodes the response into [`RemoteEvent`].
    ///
    /// # Errors
    ///
    /// Returns an error if the response is not a JSON object or a modelled
    /// field has the wrong JSON type.
    pub fn remote_event(&self) -> serde_json::Result<RemoteEvent> {
        RemoteEvent::deserialize(&self.0)
    }
}

impl From<Value> for OutlookEvent {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<OutlookEvent> for Value {
    fn from(event: OutlookEvent) -> Self {
        event.0
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample_event() -> Event {
        Event {
            subject: "Team Meeting".to_string(),
            body: ItemBody {
                content_type: BodyContentType::Html,
                content: "<p>Discuss project updates</p>".to_string(),
            },
            start: DateTimeTimeZone {
                date_time: "2025-05-30T10:00:00".to_string(),
                time_zone: "Pacific Standard Time".to_string(),
            },
            end: DateTimeTimeZone {
                date_time: "2025-05-30T11:00:00".to_string(),
                time_zone: "Pacific Standard Time".to_string(),
            },
            location: Location {
                display_name: "Conference Room 1".to_string(),
            },
            attendees: vec![Attendee {
                email_address: EmailAddress {
                    address: "john.doe@example.com".to_string(),
                    name: "John Doe".to_string(),
                },
                attendee_type: AttendeeType::Required,
            }],
            is_online_meeting: Some(true),
            online_meeting_provider: Some(OnlineMeetingProvider::TeamsForBusiness),
            transaction_id: Some("abc123".to_string()),
            categories: None,
            importance: None,
            is_all_day: None,
        }
    }

    #[test]
    fn test_event_serializes_graph_field_names() {
        let value = serde_json::to_value(sample_event()).unwrap();

        assert_eq!(
            value,
            json!({
                "subject": "Team Meeting",
                "body": { "contentType": "html", "content": "<p>Discuss project updates</p>" },
                "start": { "dateTime": "2025-05-30T10:00:00", "timeZone": "Pacific Standard Time" },
                "end": { "dateTime": "2025-05-30T11:00:00", "timeZone": "Pacific Standard Time" },
                "location": { "displayName": "Conference Room 1" },
                "attendees": [
                    {
                        "emailAddress": { "address": "john.doe@example.com", "name": "John Doe" },
                        "type": "required"
                    }
                ],
                "isOnlineMeeting": true,
                "onlineMeetingProvider": "teamsForBusiness",
                "transactionId": "abc123"
            })
        );
    }

    #[test]
    fn test_empty_patch_serializes_to_empty_object() {
        let value = serde_json::to_value(EventPatch::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = EventPatch {
            subject: Some("New title".to_string()),
            importance: Some(Importance::High),
            ..EventPatch::default()
        };

        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            json!({ "subject": "New title", "importance": "high" })
        );
    }

    #[test]
    fn test_patch_from_event_keeps_every_field() {
        let event = sample_event();
        let patch = EventPatch::from(event.clone());
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            serde_json::to_value(event).unwrap()
        );
    }

    #[test]
    fn test_unrecognized_meeting_provider_is_unknown() {
        let provider: OnlineMeetingProvider = serde_json::from_str("\"zoom\"").unwrap();
        assert_eq!(provider, OnlineMeetingProvider::Unknown);
    }

    #[test]
    fn test_outlook_event_deserializes_server_response() {
        let response = json!({
            "@odata.etag": "W/\"abc\"",
            "id": "AAMkAGI2TG93AAA=",
            "createdDateTime": "2025-05-29T18:00:00.0000000Z",
            "lastModifiedDateTime": "2025-05-29T18:00:01.0000000Z",
            "changeKey": "DwAAABYAAAA",
            "categories": [],
            "originalStartTimeZone": "Pacific Standard Time",
            "originalEndTimeZone": "Pacific Standard Time",
            "iCalUId": "040000008200E00074C5B7101A82E008",
            "reminderMinutesBeforeStart": 15,
            "isReminderOn": true,
            "hasAttachments": false,
            "hideAttendees": false,
            "subject": "Team Meeting",
            "bodyPreview": "Discuss project updates",
            "importance": "normal",
            "sensitivity": "normal",
            "isAllDay": false,
            "isCancelled": false,
            "isDraft": false,
            "isOrganizer": true,
            "responseRequested": true,
            "seriesMasterId": null,
            "showAs": "busy",
            "type": "singleInstance",
            "webLink": "https://outlook.office365.com/owa/?itemid=AAMkAGI2TG93AAA%3D",
            "onlineMeetingUrl": null,
            "isOnlineMeeting": true,
            "onlineMeetingProvider": "teamsForBusiness",
            "onlineMeeting": { "joinUrl": "https://teams.microsoft.com/l/meetup-join/1" },
            "recurrence": null,
            "responseStatus": { "response": "organizer", "time": "0001-01-01T00:00:00Z" },
            "body": { "contentType": "html", "content": "<p>Discuss project updates</p>" },
            "start": { "dateTime": "2025-05-30T10:00:00.0000000", "timeZone": "Pacific Standard Time" },
            "end": { "dateTime": "2025-05-30T11:00:00.0000000", "timeZone": "Pacific Standard Time" },
            "location": {
                "displayName": "Conference Room 1",
                "locationType": "default",
                "uniqueId": "Conference Room 1",
                "uniqueIdType": "private"
            },
            "locations": [],
            "attendees": [
                {
                    "type": "required",
                    "status": { "response": "none", "time": "0001-01-01T00:00:00Z" },
                    "emailAddress": { "name": "John Doe", "address": "john.doe@example.com" }
                }
            ],
            "organizer": { "emailAddress": { "name": "Alice", "address": "alice@example.com" } }
        });

        let event = OutlookEvent::from(response).remote_event().unwrap();

        assert_eq!(event.id.as_deref(), Some("AAMkAGI2TG93AAA="));
        assert_eq!(event.event_type, Some(EventType::SingleInstance));
        assert_eq!(event.show_as, Some(EventShowAs::Busy));
        assert_eq!(event.ical_uid.as_deref(), Some("040000008200E00074C5B7101A82E008"));
        assert_eq!(
            event.attendees.as_ref().and_then(|a| a[0].status.as_ref()).map(|s| s.response),
            Some(ResponseType::None)
        );
        assert_eq!(
            event.additional_properties.get("@odata.etag"),
            Some(&json!("W/\"abc\""))
        );
    }

    #[test]
    fn test_remote_event_decodes_empty_object() {
        let event = OutlookEvent::from(json!({})).remote_event().unwrap();
        assert_eq!(event.id, None);
        assert_eq!(event.attendees, None);
        assert!(event.additional_properties.is_empty());
    }

    #[test]
    fn test_remote_event_tolerates_nulls_and_new_enum_values() {
        let event = OutlookEvent::from(json!({
            "id": "e1",
            "categories": null,
            "attendees": null,
            "sensitivity": "unknownFutureValue",
            "type": "unknownFutureValue"
        }))
        .remote_event()
        .unwrap();

        assert_eq!(event.categories, None);
        assert_eq!(event.sensitivity, Some(EventSensitivity::Unknown));
        assert_eq!(event.event_type, Some(EventType::Unknown));
    }

    #[test]
    fn test_outlook_event_serializes_exactly_as_received() {
        let response = json!({
            "id": "e1",
            "seriesMasterId": null,
            "sensitivity": "unknownFutureValue",
            "location": {
                "address": { "city": "Oslo" },
                "coordinates": {},
                "displayName": "R"
            }
        });
        let event: OutlookEvent = serde_json::from_value(response.clone()).unwrap();

        assert_eq!(event.id(), Some("e1"));
        assert_eq!(serde_json::to_value(&event).unwrap(), response);
    }
}
