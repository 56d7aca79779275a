//! Lua scripts executed atomically by Redis
//!
//! Both scripts read and act on a single key inside one `EVALSHA`, which
//! Redis runs without interleaving other commands.

/// Replace an expired lock entry with a new token
///
/// * `KEYS[1]` - lock name
/// * `ARGV[1]` - token the caller observed and judged expired
/// * `ARGV[2]` - new token
/// * `ARGV[3]` - caller's current time, epoch milliseconds
/// * `ARGV[4]` - TTL of the new entry, milliseconds
///
/// Returns 1 when the entry was replaced (or created because it had
/// vanished), 0 otherwise. The expiry is the leading run of digits of the
/// stored value, up to an optional `:` separator.
pub const STEAL_IF_EXPIRED: &str = r"
local current = redis.call('GET', KEYS[1])
if current == false then
    redis.call('SET', KEYS[1], ARGV[2], 'PX', ARGV[4])
    return 1
end
if current ~= ARGV[1] then
    return 0
end
local expiry = tonumber(string.match(current, '^(%d+)$') or string.match(current, '^(%d+):'))
if expiry == nil or expiry >= tonumber(ARGV[3]) then
    return 0
end
redis.call('SET', KEYS[1], ARGV[2], 'PX', ARGV[4])
return 1
";

/// Delete a lock entry only if it still holds the expected token
///
/// * `KEYS[1]` - lock name
/// * `ARGV[1]` - expected token
///
/// Returns the number of deleted keys (0 or 1).
pub const COMPARE_AND_DELETE: &str = r"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
";
