//! CSS injected into the rendered view

/// Rules for editable units, overlays, the hint and the floating control
pub fn surface_css() -> String {
    r#"
[data-editable] {
    transition: background-color 0.2s ease, box-shadow 0.2s ease;
}
[data-editable]:empty::before {
    content: 'Click to edit';
    color: #999;
    font-style: italic;
}
[data-editable][data-overlay="hover"] {
    background-color: rgba(59, 130, 246, 0.1);
    box-shadow: 0 0 0 1px rgba(59, 130, 246, 0.3);
}
[data-editable][data-overlay="focus"] {
    background-color: rgba(59, 130, 246, 0.1);
    box-shadow: 0 0 0 2px rgba(59, 130, 246, 0.4);
}
[data-overlay="dashed"] {
    outline: 2px dashed rgba(239, 68, 68, 0.8);
    outline-offset: 2px;
}
[data-overlay="solid"] {
    outline: 2px solid rgb(239, 68, 68);
    outline-offset: 2px;
}
[data-livesync-hint] {
    position: fixed;
    top: 10px;
    right: 10px;
    background: rgba(0, 0, 0, 0.8);
    color: white;
    padding: 8px 12px;
    border-radius: 4px;
    font-size: 12px;
    font-family: system-ui, sans-serif;
    z-index: 1000;
    opacity: 0;
    pointer-events: none;
    animation: livesync-fade 3s ease-in-out;
}
[data-livesync-control] {
    position: absolute;
    z-index: 1001;
    background: rgb(239, 68, 68);
    color: white;
    border: none;
    border-radius: 4px;
    padding: 2px 8px;
    font-size: 12px;
    cursor: pointer;
}
@keyframes livesync-fade {
    0%, 100% { opacity: 0; }
    50% { opacity: 0.7; }
}
"#
    .to_string()
}

/// Pointer affordance for removable containers while delete mode is on
pub fn delete_mode_css(container_tags: &[String]) -> String {
    let selectors: Vec<String> = container_tags
        .iter()
        .map(|tag| format!("{}:not([data-livesync-hint])", tag.to_ascii_lowercase()))
        .collect();
    if selectors.is_empty() {
        return String::new();
    }
    format!("{} {{ cursor: crosshair; }}\n", selectors.join(", "))
}
