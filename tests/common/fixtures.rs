//! Test fixtures for Confluence content API responses

use serde_json::json;

pub const BASE_URL: &str = "https://example.atlassian.net/wiki/rest/api";

/// Minimal page as returned for `expand=body.storage,version`.
pub fn home_page_response() -> serde_json::Value {
  json!({
    "id": "12345",
    "type": "page",
    "status": "current",
    "title": "Home",
    "version": {
      "number": 7,
      "by": {
        "type": "known",
        "username": "jdoe",
        "displayName": "Jane Doe",
        "profilePicture": {
          "path": "/wiki/aa-avatar/jdoe",
          "width": 48,
          "height": 48,
          "isDefault": false
        }
      },
      "when": "2024-05-02T08:15:30.123Z",
      "message": "Quarterly refresh",
      "minorEdit": false
    },
    "body": {
      "storage": {
        "value": "<p>Welcome to the documentation space.</p>",
        "representation": "storage"
      },
      "_expandable": {
        "editor": "",
        "view": "",
        "export_view": ""
      }
    },
    "_links": {
      "webui": "/spaces/DOCS/pages/12345/Home",
      "tinyui": "/x/OTA",
      "self": "https://example.atlassian.net/wiki/rest/api/content/12345",
      "base": "https://example.atlassian.net/wiki",
      "collection": "/rest/api/content"
    },
    "_expandable": {
      "ancestors": "",
      "children": "/rest/api/content/12345/child",
      "descendants": "/rest/api/content/12345/descendant",
      "history": "/rest/api/content/12345/history",
      "metadata": "",
      "space": "/rest/api/space/DOCS",
      "container": "/rest/api/space/DOCS"
    }
  })
}

/// Page with space, container, and rendered view expanded.
pub fn expanded_page_response() -> serde_json::Value {
  json!({
    "id": "67890",
    "type": "page",
    "title": "Release Checklist",
    "space": {
      "id": 98304,
      "key": "ENG",
      "name": "Engineering",
      "type": "global",
      "_links": { "self": "https://example.atlassian.net/wiki/rest/api/space/ENG" },
      "_expandable": {
        "description": "",
        "homepage": "/rest/api/content/65537",
        "icon": ""
      }
    },
    "container": {
      "id": 98304,
      "key": "ENG",
      "name": "Engineering",
      "type": "global",
      "_links": { "self": "https://example.atlassian.net/wiki/rest/api/space/ENG" },
      "_expandable": {
        "description": "",
        "homepage": "/rest/api/content/65537",
        "icon": ""
      }
    },
    "body": {
      "view": {
        "value": "<h1>Release Checklist</h1><ul><li>Tag the build</li></ul>",
        "representation": "view",
        "_expandable": { "content": "/rest/api/content/67890" }
      },
      "_expandable": { "storage": "", "editor": "", "export_view": "" }
    },
    "_links": {
      "webui": "/spaces/ENG/pages/67890/Release+Checklist",
      "self": "https://example.atlassian.net/wiki/rest/api/content/67890"
    },
    "_expandable": { "version": "", "history": "/rest/api/content/67890/history" }
  })
}

/// Server reply to an accepted update.
pub fn update_accepted_response(number: u64) -> serde_json::Value {
  json!({
    "id": "12345",
    "type": "page",
    "status": "current",
    "title": "Home",
    "body": {
      "storage": {
        "value": "<p>hi</p>",
        "representation": "storage"
      }
    },
    "version": {
      "number": number,
      "by": { "type": "known", "displayName": "Jane Doe" },
      "when": "2024-05-03T09:00:00.000Z",
      "minorEdit": false
    },
    "_links": { "self": "https://example.atlassian.net/wiki/rest/api/content/12345" }
  })
}

/// Error body Confluence sends for a stale version number.
pub fn version_conflict_response() -> serde_json::Value {
  json!({
    "statusCode": 409,
    "message": "Version must be incremented on update. Current version is: 8",
    "reason": "Conflict"
  })
}
